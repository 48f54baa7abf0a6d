//! # Request Handlers
//!
//! Axum request handlers for the payment flow: Stripe intent creation,
//! the payment-intent webhook, and the demo crystal-coin confirmation.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use storefront_core::{
    build_customer_record, CustomPayment, CustomProperty, OrderCreatedConfirmation, PaymentRecord,
    StorefrontError,
};
use storefront_stripe::{
    PaymentIntent, PaymentIntentArgs, PaymentIntentSucceeded, PAYMENT_INTENT_SUCCEEDED,
};
use tracing::{debug, error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Body of the intent-create and demo-confirm requests
#[derive(Debug, Deserialize)]
pub struct CartIdRequest {
    /// Cart to pay for
    #[serde(rename = "cartId")]
    pub cart_id: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

fn error_to_response(err: StorefrontError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "storefront-payments",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a Stripe payment intent for a cart
#[instrument(skip(state, request), fields(cart_id = %request.cart_id))]
pub async fn create_stripe_intent(
    State(state): State<AppState>,
    Json(request): Json<CartIdRequest>,
) -> Result<Json<PaymentIntent>, (StatusCode, Json<ErrorResponse>)> {
    let wrapper = state
        .require_cart(&request.cart_id)
        .await
        .map_err(error_to_response)?;

    let args = PaymentIntentArgs::for_cart(&wrapper.cart, state.config.currency, &wrapper.id);

    let intent = state
        .stripe
        .create_payment_intent(&args)
        .await
        .map_err(|e| {
            error!("Failed to create payment intent: {}", e);
            error_to_response(e)
        })?;

    info!("Created payment intent {} for cart {}", intent.id, wrapper.id);

    Ok(Json(intent))
}

/// Handle the Stripe payment-intent webhook.
///
/// Only `payment_intent.succeeded` triggers an order submission; every
/// other verified event is accepted as a no-op.
#[instrument(skip(state, headers, body))]
pub async fn stripe_intent_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Missing Stripe-Signature header", 400)),
            )
        })?;

    let event = state.stripe.verify_webhook(&body, signature).map_err(|e| {
        error!("Webhook verification failed: {}", e);
        error_to_response(e)
    })?;

    info!("Received webhook: type={}, id={}", event.event_type, event.id);

    if event.event_type != PAYMENT_INTENT_SUCCEEDED {
        debug!("Ignoring event type {}", event.event_type);
        return Ok(StatusCode::OK);
    }

    let succeeded = PaymentIntentSucceeded::from_event(&event).map_err(error_to_response)?;

    let wrapper = state
        .require_cart(&succeeded.cart_id)
        .await
        .map_err(error_to_response)?;

    let customer = build_customer_record(&wrapper);
    let confirmation = state
        .adapter
        .submit_order(&wrapper, customer, succeeded.into_payment_record())
        .await
        .map_err(|e| {
            error!("Order submission failed: {}", e);
            error_to_response(e)
        })?;

    info!("Webhook pushed order {}", confirmation.id);

    Ok(StatusCode::OK)
}

/// Demo crystal-coin confirmation endpoint.
///
/// Called directly from the browser and completely unauthenticated;
/// demonstration only, not production payment verification.
#[instrument(skip(state, request), fields(cart_id = %request.cart_id))]
pub async fn crystalcoin_confirmed(
    State(state): State<AppState>,
    Json(request): Json<CartIdRequest>,
) -> Result<(StatusCode, Json<OrderCreatedConfirmation>), (StatusCode, Json<ErrorResponse>)> {
    let wrapper = state
        .require_cart(&request.cart_id)
        .await
        .map_err(error_to_response)?;

    let payment = PaymentRecord::Custom {
        custom: CustomPayment {
            properties: vec![
                CustomProperty {
                    property: "payment_method".to_string(),
                    value: "Crystal Coin".to_string(),
                },
                CustomProperty {
                    property: "amount".to_string(),
                    value: format!("{:.5}", wrapper.cart.total.net),
                },
            ],
        },
    };

    let customer = build_customer_record(&wrapper);
    let confirmation = state
        .adapter
        .submit_order(&wrapper, customer, payment)
        .await
        .map_err(|e| {
            error!("Order submission failed: {}", e);
            error_to_response(e)
        })?;

    Ok((StatusCode::CREATED, Json(confirmation)))
}
