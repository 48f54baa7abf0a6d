//! # storefront-stripe
//!
//! Stripe payment-intent gateway for storefront-payments-rs.
//!
//! This crate provides:
//!
//! 1. **Payment-intent creation** - POST to Stripe's Payment Intents API
//!    with the cart's net total in minor units and the cart id in metadata
//! 2. **Webhook verification** - `Stripe-Signature` HMAC verification with
//!    timestamp tolerance, plus `payment_intent.succeeded` extraction
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use storefront_stripe::{PaymentIntentArgs, StripeGateway};
//!
//! let gateway = StripeGateway::from_env()?;
//!
//! // Intent creation
//! let args = PaymentIntentArgs::for_cart(&wrapper.cart, currency, &wrapper.id);
//! let intent = gateway.create_payment_intent(&args).await?;
//!
//! // Webhook handling
//! let event = gateway.verify_webhook(&body, signature)?;
//! if event.event_type == PAYMENT_INTENT_SUCCEEDED {
//!     let succeeded = PaymentIntentSucceeded::from_event(&event)?;
//!     // resolve succeeded.cart_id and submit the order
//! }
//! ```

pub mod config;
pub mod intent;
pub mod webhook;

// Re-exports
pub use config::StripeConfig;
pub use intent::{PaymentIntent, PaymentIntentArgs, StripeGateway};
pub use webhook::{
    sign_payload, PaymentIntentSucceeded, StripeEvent, StripeEventData, PAYMENT_INTENT_SUCCEEDED,
};
