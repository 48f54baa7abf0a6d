//! # Commerce API Configuration
//!
//! Endpoint and credentials for the upstream commerce API's order
//! endpoint, loaded from environment variables.

use std::env;
use storefront_core::StorefrontError;

/// Commerce API configuration
#[derive(Debug, Clone)]
pub struct CommerceConfig {
    /// Base URL of the commerce API (no trailing slash)
    pub api_url: String,

    /// Bearer token for the order endpoint
    pub access_token: String,
}

impl CommerceConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `COMMERCE_API_URL`
    /// - `COMMERCE_ACCESS_TOKEN`
    pub fn from_env() -> Result<Self, StorefrontError> {
        dotenvy::dotenv().ok();

        let api_url = env::var("COMMERCE_API_URL").map_err(|_| {
            StorefrontError::Configuration("COMMERCE_API_URL not set".to_string())
        })?;

        let access_token = env::var("COMMERCE_ACCESS_TOKEN").map_err(|_| {
            StorefrontError::Configuration("COMMERCE_ACCESS_TOKEN not set".to_string())
        })?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            access_token,
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(api_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = CommerceConfig::new("https://commerce.example.com/", "token");
        assert_eq!(config.api_url, "https://commerce.example.com");
    }

    #[test]
    fn test_auth_header() {
        let config = CommerceConfig::new("https://commerce.example.com", "tok_123");
        assert_eq!(config.auth_header(), "Bearer tok_123");
    }
}
