//! # storefront-core
//!
//! Core types and traits for the storefront payment flow.
//!
//! This crate provides:
//! - `CartWrapper`, `Cart`, `CartItem` for the cart records this service reads
//! - `OrderSubmissionRequest` and `PaymentRecord` for the order push payload
//! - `CartStore` and `CommerceClient` traits for the injected collaborators
//! - `OrderSubmissionAdapter` for the submit/attach flow with its duplicate guard
//! - `StorefrontError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use storefront_core::{build_customer_record, OrderSubmissionAdapter, PaymentRecord};
//!
//! let adapter = OrderSubmissionAdapter::new(store, commerce, Currency::EUR);
//!
//! let wrapper = store.find("cart-1").await?.ok_or(...)?;
//! let customer = build_customer_record(&wrapper);
//!
//! // Push the order and link it back to the cart
//! let confirmation = adapter.submit_order(&wrapper, customer, payment).await?;
//! ```

pub mod cart;
pub mod commerce;
pub mod currency;
pub mod customer;
pub mod error;
pub mod order;
pub mod store;
pub mod submit;

// Re-exports for convenience
pub use cart::{Cart, CartExtra, CartItem, CartWrapper, CustomerDetails, Price};
pub use commerce::{BoxedCommerceClient, CommerceClient};
pub use currency::Currency;
pub use customer::{Address, AddressKind, CustomerRecord};
pub use error::{StorefrontError, StorefrontResult};
pub use order::{
    CustomPayment, CustomProperty, OrderCreatedConfirmation, OrderItem, OrderPrice,
    OrderSubmissionRequest, OrderTotal, PaymentRecord, StripePayment, Tax,
};
pub use store::{BoxedCartStore, CartStore};
pub use submit::{build_customer_record, tax_percent, OrderSubmissionAdapter};
