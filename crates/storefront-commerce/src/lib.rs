//! # storefront-commerce
//!
//! HTTP order-push client for the upstream commerce API.
//!
//! Implements the `CommerceClient` trait from `storefront-core`: the order
//! payload is POSTed as JSON with a bearer token and the cart-derived
//! idempotency key as a header. Errors surface as typed `StorefrontError`s
//! with no local retry.

pub mod client;
pub mod config;

// Re-exports
pub use client::HttpCommerceClient;
pub use config::CommerceConfig;
