//! # storefront-api
//!
//! HTTP API layer for storefront-payments-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Payment routes (intent creation, webhook, demo confirmation)
//! - In-memory cart store with TOML fixtures
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/payment/stripe/intent/create` | Create payment intent |
//! | POST | `/payment/stripe/intent/webhook` | Stripe webhook |
//! | POST | `/payment/crystalcoin/confirmed` | Demo confirmation |

pub mod handlers;
pub mod routes;
pub mod state;
pub mod store;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
pub use store::MemoryCartStore;
