//! # In-Memory Cart Store
//!
//! `CartStore` implementation backing the demo service and the tests.
//! Carts are loaded from `config/carts.toml`; a real deployment would
//! implement `CartStore` against the cart system's database instead.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use storefront_core::{
    Cart, CartStore, CartWrapper, CustomerDetails, StorefrontError, StorefrontResult,
};
use uuid::Uuid;

/// Process-local cart store
#[derive(Default)]
pub struct MemoryCartStore {
    carts: RwLock<HashMap<String, CartWrapper>>,
}

impl MemoryCartStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a cart wrapper
    pub fn insert(&self, wrapper: CartWrapper) {
        self.carts
            .write()
            .expect("cart store lock poisoned")
            .insert(wrapper.id.clone(), wrapper);
    }

    /// Number of carts held
    pub fn len(&self) -> usize {
        self.carts.read().expect("cart store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load a store from the TOML fixture format
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let fixtures: CartFixtures = toml::from_str(toml_str)?;
        let store = Self::new();
        for fixture in fixtures.carts {
            let id = fixture
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string());
            store.insert(CartWrapper {
                id,
                cart: fixture.cart,
                customer: fixture.customer,
                extra: Default::default(),
            });
        }
        Ok(store)
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn find(&self, cart_id: &str) -> StorefrontResult<Option<CartWrapper>> {
        Ok(self
            .carts
            .read()
            .expect("cart store lock poisoned")
            .get(cart_id)
            .cloned())
    }

    async fn attach_order_id(&self, cart_id: &str, order_id: &str) -> StorefrontResult<()> {
        let mut carts = self.carts.write().expect("cart store lock poisoned");
        let wrapper = carts
            .get_mut(cart_id)
            .ok_or_else(|| StorefrontError::CartNotFound {
                cart_id: cart_id.to_string(),
            })?;
        wrapper.extra.order_id = Some(order_id.to_string());
        Ok(())
    }
}

/// Fixture file format (`config/carts.toml`)
#[derive(Debug, Deserialize)]
struct CartFixtures {
    #[serde(default)]
    carts: Vec<CartFixture>,
}

#[derive(Debug, Deserialize)]
struct CartFixture {
    #[serde(default)]
    id: Option<String>,
    cart: Cart,
    #[serde(default)]
    customer: Option<CustomerDetails>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
[[carts]]
id = "demo-cart"

[[carts.cart.items]]
sku = "chair-red"
name = "Red Chair"
quantity = 2

[carts.cart.items.price]
gross = 100.0
net = 80.0

[carts.cart.total]
gross = 100.0
net = 80.0

[carts.customer]
firstname = "Ada"
"#;

    #[tokio::test]
    async fn test_fixture_loading_and_lookup() {
        let store = MemoryCartStore::from_toml(FIXTURE).unwrap();
        assert_eq!(store.len(), 1);

        let wrapper = store.find("demo-cart").await.unwrap().unwrap();
        assert_eq!(wrapper.cart.items[0].sku, "chair-red");
        assert_eq!(
            wrapper.customer.as_ref().unwrap().firstname.as_deref(),
            Some("Ada")
        );

        assert!(store.find("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_attach_order_id() {
        let store = MemoryCartStore::from_toml(FIXTURE).unwrap();
        store.attach_order_id("demo-cart", "ord_1").await.unwrap();

        let wrapper = store.find("demo-cart").await.unwrap().unwrap();
        assert_eq!(wrapper.order_id(), Some("ord_1"));

        let err = store.attach_order_id("missing", "ord_2").await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
