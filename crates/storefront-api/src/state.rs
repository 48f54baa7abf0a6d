//! # Application State
//!
//! Shared state for the Axum application. All collaborators (cart store,
//! commerce client, Stripe gateway) are injected here rather than reached
//! through module-level globals.

use crate::store::MemoryCartStore;
use std::sync::Arc;
use storefront_commerce::HttpCommerceClient;
use storefront_core::{
    BoxedCartStore, BoxedCommerceClient, CartWrapper, Currency, OrderSubmissionAdapter,
    StorefrontError, StorefrontResult,
};
use storefront_stripe::StripeGateway;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Currency stamped on submitted orders and intents
    pub currency: Currency,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let currency = std::env::var("ORDER_CURRENCY")
            .ok()
            .and_then(|code| Currency::parse(&code))
            .unwrap_or_default();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            currency,
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Order submission adapter (duplicate guard + cart/order linkage)
    pub adapter: Arc<OrderSubmissionAdapter>,
    /// Cart store, also used directly for lookups
    pub cart_store: BoxedCartStore,
    /// Stripe gateway (intents + webhook verification)
    pub stripe: Arc<StripeGateway>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create the production state: fixture-backed cart store, HTTP
    /// commerce client and Stripe gateway from the environment.
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let cart_store: BoxedCartStore = Arc::new(load_cart_fixtures()?);

        let commerce: BoxedCommerceClient = Arc::new(
            HttpCommerceClient::from_env()
                .map_err(|e| anyhow::anyhow!("Failed to initialize commerce client: {}", e))?,
        );

        let stripe = StripeGateway::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        Ok(Self::with_collaborators(config, cart_store, commerce, stripe))
    }

    /// Assemble state from explicit collaborators (used by tests)
    pub fn with_collaborators(
        config: AppConfig,
        cart_store: BoxedCartStore,
        commerce: BoxedCommerceClient,
        stripe: StripeGateway,
    ) -> Self {
        let adapter = Arc::new(OrderSubmissionAdapter::new(
            cart_store.clone(),
            commerce,
            config.currency,
        ));

        Self {
            adapter,
            cart_store,
            stripe: Arc::new(stripe),
            config,
        }
    }

    /// Resolve a cart or fail with `CartNotFound`
    pub async fn require_cart(&self, cart_id: &str) -> StorefrontResult<CartWrapper> {
        self.cart_store
            .find(cart_id)
            .await?
            .ok_or_else(|| StorefrontError::CartNotFound {
                cart_id: cart_id.to_string(),
            })
    }
}

/// Load demo carts from config file
fn load_cart_fixtures() -> anyhow::Result<MemoryCartStore> {
    let config_paths = [
        "config/carts.toml",
        "../config/carts.toml",
        "../../config/carts.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let store = MemoryCartStore::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded {} carts from {}", store.len(), path);
            return Ok(store);
        }
    }

    tracing::warn!("No cart fixtures found, starting with an empty store");
    Ok(MemoryCartStore::new())
}
