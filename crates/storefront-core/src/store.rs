//! # Cart Store Trait
//!
//! Keyed lookup of cart wrappers and the single mutation this service
//! performs: attaching a created order id. The store is an injected
//! collaborator; it owns its own concurrency control.

use crate::cart::CartWrapper;
use crate::error::StorefrontResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Cart persistence collaborator.
///
/// Implementations: in-memory store for the demo service and tests; a
/// real deployment would back this with the cart system's database.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Look up a cart wrapper by id. `None` when absent; handlers map
    /// that to `CartNotFound`.
    async fn find(&self, cart_id: &str) -> StorefrontResult<Option<CartWrapper>>;

    /// Attach the created order id to the wrapper. Called exactly once
    /// per successful submission, after the commerce API returns.
    async fn attach_order_id(&self, cart_id: &str, order_id: &str) -> StorefrontResult<()>;
}

/// Type alias for a shared cart store (dynamic dispatch)
pub type BoxedCartStore = Arc<dyn CartStore>;
