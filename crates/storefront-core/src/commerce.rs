//! # Commerce Client Trait
//!
//! Order push against the upstream commerce API. Errors propagate to the
//! caller unchanged; there is no local retry.

use crate::error::StorefrontResult;
use crate::order::{OrderCreatedConfirmation, OrderSubmissionRequest};
use async_trait::async_trait;
use std::sync::Arc;

/// Upstream commerce API collaborator.
#[async_trait]
pub trait CommerceClient: Send + Sync {
    /// Create an order from the submission payload and return the
    /// confirmation. Implementations forward the payload's idempotency
    /// key so a re-push for the same cart cannot create a second order
    /// upstream.
    async fn create_order(
        &self,
        request: &OrderSubmissionRequest,
    ) -> StorefrontResult<OrderCreatedConfirmation>;
}

/// Type alias for a shared commerce client (dynamic dispatch)
pub type BoxedCommerceClient = Arc<dyn CommerceClient>;
