//! # Customer Record
//!
//! Customer shape expected by the commerce API's order endpoint.
//! Missing source fields resolve to fixed demo placeholders, by contract:
//! this is demo behavior, not a validation gate.

use serde::{Deserialize, Serialize};

/// Placeholder defaults used when a cart carries no customer data
pub mod defaults {
    pub const FIRST_NAME: &str = "William";
    pub const LAST_NAME: &str = "Wallace";
    pub const COMPANY: &str = "Freedom Inc.";
    pub const STREET: &str = "845 Market St";
    pub const CITY: &str = "San Francisco";
    pub const COUNTRY: &str = "USA";
    pub const STATE: &str = "CA";
    pub const POSTAL_CODE: &str = "94103";
}

/// Address role in an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    Billing,
    Delivery,
}

/// A postal address entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(rename = "type")]
    pub kind: AddressKind,
    pub street: String,
    pub city: String,
    pub country: String,
    pub state: String,
    pub postal_code: String,
}

/// Customer record sent with an order submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub identifier: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub addresses: Vec<Address>,
}
