//! # Storefront Error Types
//!
//! Typed error handling for the storefront payment flow.
//! All payment operations return `Result<T, StorefrontError>`.

use thiserror::Error;

/// Core error type for all payment-flow operations
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Cart lookup failed
    #[error("Cart '{cart_id}' does not exist")]
    CartNotFound { cart_id: String },

    /// An order has already been pushed for this cart
    #[error("Order '{order_id}' already exists")]
    DuplicateSubmission { order_id: String },

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Upstream commerce API rejected the order push
    #[error("Order push failed: {0}")]
    OrderPushFailed(String),

    /// Attaching the created order id to the cart wrapper failed
    #[error("Failed to attach order '{order_id}' to cart '{cart_id}'")]
    OrderAttachFailed { cart_id: String, order_id: String },

    /// Network/HTTP error communicating with a collaborator
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Webhook signature verification failed
    #[error("Webhook verification failed: {0}")]
    WebhookVerificationFailed(String),

    /// Webhook payload parsing error
    #[error("Webhook parse error: {0}")]
    WebhookParseError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StorefrontError {
    /// Returns true if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StorefrontError::NetworkError(_) | StorefrontError::ProviderError { .. }
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            StorefrontError::Configuration(_) => 500,
            StorefrontError::InvalidRequest(_) => 400,
            StorefrontError::CartNotFound { .. } => 404,
            StorefrontError::DuplicateSubmission { .. } => 403,
            StorefrontError::ProviderError { .. } => 502,
            StorefrontError::OrderPushFailed(_) => 502,
            StorefrontError::OrderAttachFailed { .. } => 500,
            StorefrontError::NetworkError(_) => 503,
            StorefrontError::WebhookVerificationFailed(_) => 401,
            StorefrontError::WebhookParseError(_) => 400,
            StorefrontError::Serialization(_) => 500,
            StorefrontError::Internal(_) => 500,
        }
    }
}

/// Result type alias for payment-flow operations
pub type StorefrontResult<T> = Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            StorefrontError::CartNotFound {
                cart_id: "x".into()
            }
            .status_code(),
            404
        );
        assert_eq!(
            StorefrontError::DuplicateSubmission {
                order_id: "ord_1".into()
            }
            .status_code(),
            403
        );
        assert_eq!(
            StorefrontError::WebhookVerificationFailed("bad sig".into()).status_code(),
            401
        );
        assert_eq!(
            StorefrontError::OrderPushFailed("rejected".into()).status_code(),
            502
        );
    }

    #[test]
    fn test_retryable_errors() {
        assert!(StorefrontError::NetworkError("timeout".into()).is_retryable());
        assert!(!StorefrontError::DuplicateSubmission {
            order_id: "ord_1".into()
        }
        .is_retryable());
    }

    #[test]
    fn test_duplicate_submission_message() {
        let err = StorefrontError::DuplicateSubmission {
            order_id: "ord_42".into(),
        };
        assert_eq!(err.to_string(), "Order 'ord_42' already exists");
    }
}
