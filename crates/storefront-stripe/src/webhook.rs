//! # Stripe Webhook Verification
//!
//! Signature verification and event parsing for the payment-intent
//! webhook. Verification follows Stripe's scheme: the `Stripe-Signature`
//! header carries a timestamp and one or more HMAC-SHA256 signatures over
//! `"{timestamp}.{raw_body}"`, keyed with the endpoint secret.

use crate::intent::StripeGateway;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use storefront_core::{PaymentRecord, StorefrontError, StorefrontResult, StripePayment};
use tracing::{debug, instrument};

/// Event name that triggers an order submission
pub const PAYMENT_INTENT_SUCCEEDED: &str = "payment_intent.succeeded";

/// Timestamp tolerance for webhook signatures (seconds)
const SIGNATURE_TOLERANCE_SECS: i64 = 300;

/// A verified Stripe event
#[derive(Debug, Clone, Deserialize)]
pub struct StripeEvent {
    /// Event id (evt_...)
    pub id: String,

    /// Event name, e.g. "payment_intent.succeeded"
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp of event creation
    pub created: i64,

    /// Event payload
    pub data: StripeEventData,
}

/// The `data` field of a Stripe event
#[derive(Debug, Clone, Deserialize)]
pub struct StripeEventData {
    /// The object the event describes; shape varies by event name
    pub object: serde_json::Map<String, Value>,
}

impl StripeGateway {
    /// Verify a webhook signature and parse the event.
    ///
    /// # Arguments
    /// * `payload` - Raw webhook body bytes
    /// * `signature` - Value of the `Stripe-Signature` header
    #[instrument(skip(self, payload, signature))]
    pub fn verify_webhook(&self, payload: &[u8], signature: &str) -> StorefrontResult<StripeEvent> {
        let sig_parts = parse_signature_header(signature)?;

        let now = Utc::now().timestamp();
        if (now - sig_parts.timestamp).abs() > SIGNATURE_TOLERANCE_SECS {
            return Err(StorefrontError::WebhookVerificationFailed(
                "Timestamp outside tolerance".to_string(),
            ));
        }

        let signed_payload = format!(
            "{}.{}",
            sig_parts.timestamp,
            String::from_utf8_lossy(payload)
        );
        let expected_sig =
            compute_hmac_sha256(&self.config.webhook_endpoint_secret, &signed_payload);

        let valid = sig_parts
            .signatures
            .iter()
            .any(|sig| constant_time_compare(sig, &expected_sig));

        if !valid {
            return Err(StorefrontError::WebhookVerificationFailed(
                "Signature mismatch".to_string(),
            ));
        }

        let event: StripeEvent = serde_json::from_slice(payload).map_err(|e| {
            StorefrontError::WebhookParseError(format!("Failed to parse webhook: {}", e))
        })?;

        debug!("Verified Stripe webhook: type={}", event.event_type);

        Ok(event)
    }
}

/// Fields extracted from a `payment_intent.succeeded` event
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntentSucceeded {
    /// Event id (evt_...)
    pub event_id: String,
    /// Payment intent id (pi_...)
    pub intent_id: String,
    /// Cart id from the intent metadata
    pub cart_id: String,
    /// Payment method type reported on the first charge
    pub payment_method: String,
    /// Receipt URL from the first charge
    pub receipt_url: String,
}

impl PaymentIntentSucceeded {
    /// Extract the submission-relevant fields from a verified event.
    ///
    /// The intent id and the cart id in `metadata.cartId` are required;
    /// charge details are display metadata and default when absent.
    pub fn from_event(event: &StripeEvent) -> StorefrontResult<Self> {
        let object = &event.data.object;

        let intent_id = object
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                StorefrontError::WebhookParseError("Missing payment intent id".to_string())
            })?
            .to_string();

        let cart_id = object
            .get("metadata")
            .and_then(|m| m.get("cartId"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                StorefrontError::WebhookParseError("Missing cartId in intent metadata".to_string())
            })?
            .to_string();

        let first_charge = object
            .get("charges")
            .and_then(|c| c.get("data"))
            .and_then(|d| d.get(0));

        let payment_method = first_charge
            .and_then(|c| c.get("payment_method_details"))
            .and_then(|d| d.get("type"))
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();

        let receipt_url = first_charge
            .and_then(|c| c.get("receipt_url"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            event_id: event.id.clone(),
            intent_id,
            cart_id,
            payment_method,
            receipt_url,
        })
    }

    /// Build the stripe-tagged payment record for the order submission
    pub fn into_payment_record(self) -> PaymentRecord {
        PaymentRecord::Stripe {
            stripe: StripePayment {
                payment_intent_id: self.intent_id,
                payment_method: self.payment_method,
                stripe: format!("eventId:{}", self.event_id),
                metadata: self.receipt_url,
            },
        }
    }
}

// =============================================================================
// Signature primitives
// =============================================================================

struct SignatureHeader {
    timestamp: i64,
    signatures: Vec<String>,
}

fn parse_signature_header(header: &str) -> StorefrontResult<SignatureHeader> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let kv: Vec<&str> = part.split('=').collect();
        if kv.len() != 2 {
            continue;
        }
        match kv[0] {
            "t" => {
                timestamp = kv[1].parse().ok();
            }
            "v1" => {
                signatures.push(kv[1].to_string());
            }
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or_else(|| {
        StorefrontError::WebhookVerificationFailed("Missing timestamp in signature".to_string())
    })?;

    if signatures.is_empty() {
        return Err(StorefrontError::WebhookVerificationFailed(
            "No v1 signature found".to_string(),
        ));
    }

    Ok(SignatureHeader {
        timestamp,
        signatures,
    })
}

fn compute_hmac_sha256(secret: &str, message: &str) -> String {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    type HmacSha256 = Hmac<Sha256>;

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// Produce a `Stripe-Signature` header value for a payload. Used by tests
/// and local tooling to exercise the webhook route without Stripe.
pub fn sign_payload(endpoint_secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let signed_payload = format!("{}.{}", timestamp, String::from_utf8_lossy(payload));
    let signature = compute_hmac_sha256(endpoint_secret, &signed_payload);
    format!("t={},v1={}", timestamp, signature)
}
