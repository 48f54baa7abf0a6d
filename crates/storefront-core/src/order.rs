//! # Order Submission Types
//!
//! The payload pushed to the commerce API once a payment is confirmed,
//! and the confirmation it returns. All of this is derived per request
//! and never stored locally.

use crate::currency::Currency;
use crate::customer::CustomerRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tax entry on an order price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tax {
    /// Tax scheme name, e.g. "VAT"
    pub name: String,
    /// Derived display percentage, not authoritative tax logic
    pub percent: f64,
}

impl Tax {
    pub fn vat(percent: f64) -> Self {
        Self {
            name: "VAT".to_string(),
            percent,
        }
    }
}

/// Price on an order line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPrice {
    pub gross: f64,
    pub net: f64,
    pub currency: Currency,
    pub tax: Tax,
}

/// A line item in an order submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub sku: String,
    pub name: String,
    pub quantity: u32,
    pub image_url: String,
    pub price: OrderPrice,
}

/// Order total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTotal {
    pub currency: Currency,
    pub gross: f64,
    pub net: f64,
    pub tax: Tax,
}

/// Stripe payment details attached to an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripePayment {
    /// Payment intent id (pi_...)
    pub payment_intent_id: String,
    /// Payment method type reported on the charge (e.g. "card")
    pub payment_method: String,
    /// Raw event reference, "eventId:<evt_...>"
    pub stripe: String,
    /// Receipt URL from the charge
    pub metadata: String,
}

/// A single property on a custom payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomProperty {
    pub property: String,
    pub value: String,
}

/// Custom (non-provider) payment details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomPayment {
    pub properties: Vec<CustomProperty>,
}

/// Payment record, tagged by provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum PaymentRecord {
    Stripe { stripe: StripePayment },
    Custom { custom: CustomPayment },
}

impl PaymentRecord {
    pub fn provider_name(&self) -> &'static str {
        match self {
            PaymentRecord::Stripe { .. } => "stripe",
            PaymentRecord::Custom { .. } => "custom",
        }
    }
}

/// Full order-submission payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSubmissionRequest {
    pub customer: CustomerRecord,
    /// Reshaped line items; the commerce API calls this list "cart"
    pub cart: Vec<OrderItem>,
    pub total: OrderTotal,
    pub payment: Vec<PaymentRecord>,

    /// Sent as an Idempotency-Key header, not in the body
    #[serde(skip)]
    pub idempotency_key: Option<String>,
}

/// Confirmation returned by the commerce API after order creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedConfirmation {
    /// Unique order identifier
    pub id: String,
    /// Creation timestamp, when the API returns one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
