//! # Commerce Order Client
//!
//! `CommerceClient` implementation over the commerce API's REST order
//! endpoint. Pushes the JSON order payload and forwards the cart-derived
//! idempotency key as a header so a re-push cannot create a second order.

use crate::config::CommerceConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use storefront_core::{
    CommerceClient, OrderCreatedConfirmation, OrderSubmissionRequest, StorefrontError,
    StorefrontResult,
};
use tracing::{debug, error, info, instrument};

/// HTTP-backed commerce API client
pub struct HttpCommerceClient {
    config: CommerceConfig,
    client: Client,
}

impl HttpCommerceClient {
    /// Create a new client
    pub fn new(config: CommerceConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> StorefrontResult<Self> {
        let config = CommerceConfig::from_env()?;
        Ok(Self::new(config))
    }
}

#[async_trait]
impl CommerceClient for HttpCommerceClient {
    #[instrument(skip(self, request), fields(items = request.cart.len()))]
    async fn create_order(
        &self,
        request: &OrderSubmissionRequest,
    ) -> StorefrontResult<OrderCreatedConfirmation> {
        let url = format!("{}/orders", self.config.api_url);

        debug!("Pushing order: {} items", request.cart.len());

        let mut http_request = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .json(request);

        if let Some(ref key) = request.idempotency_key {
            http_request = http_request.header("Idempotency-Key", key);
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| StorefrontError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StorefrontError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Commerce API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<CommerceErrorResponse>(&body) {
                return Err(StorefrontError::OrderPushFailed(error_response.message));
            }

            return Err(StorefrontError::OrderPushFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let confirmation: OrderCreatedConfirmation =
            serde_json::from_str(&body).map_err(|e| {
                StorefrontError::Serialization(format!(
                    "Failed to parse order confirmation: {}",
                    e
                ))
            })?;

        info!("Order created: id={}", confirmation.id);

        Ok(confirmation)
    }
}

#[derive(Debug, Deserialize)]
struct CommerceErrorResponse {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{
        Address, AddressKind, Currency, CustomPayment, CustomProperty, CustomerRecord, OrderItem,
        OrderPrice, OrderTotal, PaymentRecord, Tax,
    };
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_request() -> OrderSubmissionRequest {
        let address = Address {
            kind: AddressKind::Billing,
            street: "845 Market St".into(),
            city: "San Francisco".into(),
            country: "USA".into(),
            state: "CA".into(),
            postal_code: "94103".into(),
        };
        OrderSubmissionRequest {
            customer: CustomerRecord {
                identifier: "".into(),
                first_name: "William".into(),
                last_name: "Wallace".into(),
                company_name: "Freedom Inc.".into(),
                addresses: vec![
                    address.clone(),
                    Address {
                        kind: AddressKind::Delivery,
                        ..address
                    },
                ],
            },
            cart: vec![OrderItem {
                sku: "chair-red".into(),
                name: "Red Chair".into(),
                quantity: 1,
                image_url: "".into(),
                price: OrderPrice {
                    gross: 100.0,
                    net: 80.0,
                    currency: Currency::EUR,
                    tax: Tax::vat(-20.0),
                },
            }],
            total: OrderTotal {
                currency: Currency::EUR,
                gross: 100.0,
                net: 80.0,
                tax: Tax::vat(-20.0),
            },
            payment: vec![PaymentRecord::Custom {
                custom: CustomPayment {
                    properties: vec![CustomProperty {
                        property: "payment_method".into(),
                        value: "Crystal Coin".into(),
                    }],
                },
            }],
            idempotency_key: Some("cart-1".into()),
        }
    }

    #[tokio::test]
    async fn test_create_order() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/orders"))
            .and(header("Idempotency-Key", "cart-1"))
            .and(header("Authorization", "Bearer tok_123"))
            .and(body_partial_json(serde_json::json!({
                "total": { "currency": "EUR", "gross": 100.0, "net": 80.0 },
                "payment": [{ "provider": "custom" }]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "ord_9"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpCommerceClient::new(CommerceConfig::new(server.uri(), "tok_123"));
        let confirmation = client.create_order(&sample_request()).await.unwrap();

        assert_eq!(confirmation.id, "ord_9");
    }

    #[tokio::test]
    async fn test_create_order_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "message": "total does not match line items"
            })))
            .mount(&server)
            .await;

        let client = HttpCommerceClient::new(CommerceConfig::new(server.uri(), "tok_123"));
        let err = client.create_order(&sample_request()).await.unwrap_err();

        match &err {
            StorefrontError::OrderPushFailed(message) => {
                assert_eq!(message, "total does not match line items");
            }
            other => panic!("expected OrderPushFailed, got {other:?}"),
        }
        assert_eq!(err.status_code(), 502);
    }

    #[tokio::test]
    async fn test_idempotency_key_header_omitted_when_absent() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "ord_10"
            })))
            .mount(&server)
            .await;

        let mut request = sample_request();
        request.idempotency_key = None;

        let client = HttpCommerceClient::new(CommerceConfig::new(server.uri(), "tok_123"));
        let confirmation = client.create_order(&request).await.unwrap();
        assert_eq!(confirmation.id, "ord_10");
    }
}
