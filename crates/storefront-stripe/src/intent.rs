//! # Stripe Payment Intents
//!
//! Payment-intent creation against the Stripe REST API. The intent amount
//! is the cart's net total in minor currency units; the cart id travels in
//! the intent metadata so the webhook can resolve the cart later.

use crate::config::StripeConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use storefront_core::{Cart, Currency, StorefrontError, StorefrontResult};
use tracing::{debug, error, info, instrument};

/// Arguments for creating a payment intent
#[derive(Debug, Clone)]
pub struct PaymentIntentArgs {
    /// Amount in minor currency units (cents for EUR)
    pub amount: i64,
    /// Intent currency
    pub currency: Currency,
    /// Cart id, carried in `metadata[cartId]`
    pub cart_id: String,
}

impl PaymentIntentArgs {
    /// Build intent arguments for a cart: the amount is the net total
    /// converted per-currency to minor units.
    pub fn for_cart(cart: &Cart, currency: Currency, cart_id: impl Into<String>) -> Self {
        Self {
            amount: currency.to_minor_units(cart.total.net),
            currency,
            cart_id: cart_id.into(),
        }
    }
}

/// Created payment intent, as returned to the storefront
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Intent id (pi_...)
    pub id: String,
    /// Client secret the storefront hands to Stripe.js
    pub client_secret: String,
    /// Amount in minor units
    pub amount: i64,
    /// Lowercase ISO currency code, as Stripe reports it
    pub currency: String,
    /// Intent status (e.g. "requires_payment_method")
    pub status: String,
}

/// Stripe gateway: intent creation plus webhook verification (see
/// [`crate::webhook`]).
pub struct StripeGateway {
    pub(crate) config: StripeConfig,
    client: Client,
}

impl StripeGateway {
    /// Create a new gateway
    pub fn new(config: StripeConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> StorefrontResult<Self> {
        let config = StripeConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// The configured webhook endpoint secret
    pub fn webhook_endpoint_secret(&self) -> &str {
        &self.config.webhook_endpoint_secret
    }

    /// Create a payment intent for the given arguments.
    #[instrument(skip(self, args), fields(cart_id = %args.cart_id, amount = args.amount))]
    pub async fn create_payment_intent(
        &self,
        args: &PaymentIntentArgs,
    ) -> StorefrontResult<PaymentIntent> {
        if args.amount <= 0 {
            return Err(StorefrontError::InvalidRequest(format!(
                "Intent amount must be positive, got {}",
                args.amount
            )));
        }

        debug!(
            "Creating payment intent: amount={}, currency={}",
            args.amount, args.currency
        );

        let form_params: Vec<(String, String)> = vec![
            ("amount".to_string(), args.amount.to_string()),
            (
                "currency".to_string(),
                args.currency.as_str().to_lowercase(),
            ),
            ("metadata[cartId]".to_string(), args.cart_id.clone()),
            (
                "automatic_payment_methods[enabled]".to_string(),
                "true".to_string(),
            ),
        ];

        let url = format!("{}/v1/payment_intents", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .header("Idempotency-Key", &args.cart_id)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| StorefrontError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StorefrontError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(StorefrontError::ProviderError {
                    provider: "stripe".to_string(),
                    message: error_response.error.message,
                });
            }

            return Err(StorefrontError::ProviderError {
                provider: "stripe".to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let intent: PaymentIntent = serde_json::from_str(&body).map_err(|e| {
            StorefrontError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })?;

        info!("Created payment intent: id={}", intent.id);

        Ok(intent)
    }
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: String,
}
