//! # Cart Types
//!
//! Cart and cart-wrapper records. Carts are owned by the external cart
//! system; this crate only reads them and attaches the created order id.

use serde::{Deserialize, Serialize};

/// Gross/net price pair in major currency units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Amount including tax
    pub gross: f64,
    /// Amount excluding tax
    pub net: f64,
}

impl Price {
    pub fn new(gross: f64, net: f64) -> Self {
        Self { gross, net }
    }
}

/// A line item in a cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Variant SKU
    pub sku: String,

    /// Display name (falls back to the SKU when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Quantity
    pub quantity: u32,

    /// Optional product image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Line price (already multiplied by quantity)
    pub price: Price,
}

impl CartItem {
    /// Display name with SKU fallback
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.sku)
    }
}

/// A cart: line items plus computed totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub total: Price,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Raw customer fields captured alongside a cart. All optional; the
/// order-submission adapter substitutes placeholder defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

/// Submission metadata attached to a cart wrapper
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartExtra {
    /// Set once an order has been pushed for this cart; at most once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

/// A cart plus submission metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartWrapper {
    /// Cart identifier used by the store and in payment metadata
    pub id: String,

    /// The cart itself
    pub cart: Cart,

    /// Optional raw customer fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerDetails>,

    /// Submission metadata
    #[serde(default)]
    pub extra: CartExtra,
}

impl CartWrapper {
    /// Create a wrapper with no customer data and no attached order
    pub fn new(id: impl Into<String>, cart: Cart) -> Self {
        Self {
            id: id.into(),
            cart,
            customer: None,
            extra: CartExtra::default(),
        }
    }

    /// The attached order id, if an order has already been pushed
    pub fn order_id(&self) -> Option<&str> {
        self.extra.order_id.as_deref()
    }
}
