//! # Stripe Configuration
//!
//! Configuration for the Stripe payment-intent gateway.
//! All secrets are loaded from environment variables.

use std::env;
use storefront_core::StorefrontError;

/// Stripe API configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// Webhook endpoint signing secret (whsec_...)
    pub webhook_endpoint_secret: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `STRIPE_SECRET_KEY`
    /// - `STRIPE_WEBHOOK_ENDPOINT_SECRET`
    pub fn from_env() -> Result<Self, StorefrontError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let secret_key = env::var("STRIPE_SECRET_KEY").map_err(|_| {
            StorefrontError::Configuration("STRIPE_SECRET_KEY not set".to_string())
        })?;

        let webhook_endpoint_secret = env::var("STRIPE_WEBHOOK_ENDPOINT_SECRET").map_err(|_| {
            StorefrontError::Configuration("STRIPE_WEBHOOK_ENDPOINT_SECRET not set".to_string())
        })?;

        // Validate key formats
        if !secret_key.starts_with("sk_test_") && !secret_key.starts_with("sk_live_") {
            return Err(StorefrontError::Configuration(
                "STRIPE_SECRET_KEY must start with sk_test_ or sk_live_".to_string(),
            ));
        }

        if !webhook_endpoint_secret.starts_with("whsec_") {
            return Err(StorefrontError::Configuration(
                "STRIPE_WEBHOOK_ENDPOINT_SECRET must start with whsec_".to_string(),
            ));
        }

        Ok(Self {
            secret_key,
            webhook_endpoint_secret,
            api_base_url: "https://api.stripe.com".to_string(),
            api_version: "2024-12-18.acacia".to_string(),
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        secret_key: impl Into<String>,
        webhook_endpoint_secret: impl Into<String>,
    ) -> Self {
        Self {
            secret_key: secret_key.into(),
            webhook_endpoint_secret: webhook_endpoint_secret.into(),
            api_base_url: "https://api.stripe.com".to_string(),
            api_version: "2024-12-18.acacia".to_string(),
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}
