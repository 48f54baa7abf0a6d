//! # Storefront Payments
//!
//! Payment flow service: Stripe intents, webhook confirmation, order push.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export STRIPE_WEBHOOK_ENDPOINT_SECRET=whsec_...
//! export COMMERCE_API_URL=https://commerce.example.com/api
//! export COMMERCE_ACCESS_TOKEN=...
//!
//! # Run the server
//! storefront-payments
//! ```

use storefront_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Order currency: {}", state.config.currency);

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("Storefront payments starting on http://{}", addr);

    if !is_prod {
        info!("Intent:  POST http://{}/payment/stripe/intent/create", addr);
        info!("Webhook: POST http://{}/payment/stripe/intent/webhook", addr);
        info!("Demo:    POST http://{}/payment/crystalcoin/confirmed", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
