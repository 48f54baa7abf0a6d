//! # Routes
//!
//! Axum router configuration for the payment flow.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - POST /payment/stripe/intent/create - Create a payment intent for a cart
/// - POST /payment/stripe/intent/webhook - Stripe payment-intent webhook
/// - POST /payment/crystalcoin/confirmed - Demo payment confirmation
/// - GET  /health - Health check
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - the storefront calls the intent and demo
    // endpoints from the browser
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Webhook must receive the raw body for signature verification, so it
    // shares the payment nest but never goes through body conversion.
    let payment_routes = Router::new()
        .route("/stripe/intent/create", post(handlers::create_stripe_intent))
        .route("/stripe/intent/webhook", post(handlers::stripe_intent_webhook))
        .route("/crystalcoin/confirmed", post(handlers::crystalcoin_confirmed));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/payment", payment_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
