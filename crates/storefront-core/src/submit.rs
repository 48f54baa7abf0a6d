//! # Order Submission Adapter
//!
//! Sits between the cart store, the commerce API and the payment
//! gateways: reshapes a cart plus a confirmed payment into an
//! order-submission payload, pushes it, and links the created order back
//! to the cart wrapper.

use crate::cart::CartWrapper;
use crate::commerce::BoxedCommerceClient;
use crate::currency::Currency;
use crate::customer::{defaults, Address, AddressKind, CustomerRecord};
use crate::error::{StorefrontError, StorefrontResult};
use crate::order::{
    OrderCreatedConfirmation, OrderItem, OrderPrice, OrderSubmissionRequest, OrderTotal,
    PaymentRecord, Tax,
};
use crate::store::BoxedCartStore;
use tracing::{info, instrument};

/// Derived display tax percentage: `(net / gross - 1) * 100`.
///
/// The net/gross ordering is the contract of the upstream order API and
/// is preserved verbatim. Zero-gross items resolve to 0.0 so the payload
/// never carries a non-finite number.
pub fn tax_percent(gross: f64, net: f64) -> f64 {
    if gross == 0.0 {
        return 0.0;
    }
    (net / gross - 1.0) * 100.0
}

/// Order submission against the commerce API, with the duplicate guard
/// and the cart/order linkage.
pub struct OrderSubmissionAdapter {
    store: BoxedCartStore,
    commerce: BoxedCommerceClient,
    currency: Currency,
}

impl OrderSubmissionAdapter {
    pub fn new(store: BoxedCartStore, commerce: BoxedCommerceClient, currency: Currency) -> Self {
        Self {
            store,
            commerce,
            currency,
        }
    }

    /// The currency stamped on every submitted item and total
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Push an order for a confirmed payment.
    ///
    /// Fails with `DuplicateSubmission` when the wrapper already carries
    /// an order id; the commerce API is not called in that case. On
    /// success the created order id is attached to the wrapper before the
    /// confirmation is returned. Create and attach are not transactional:
    /// an attach failure after a successful create leaves an upstream
    /// order that is only discoverable in the commerce system.
    #[instrument(skip(self, cart_wrapper, customer, payment), fields(cart_id = %cart_wrapper.id))]
    pub async fn submit_order(
        &self,
        cart_wrapper: &CartWrapper,
        customer: CustomerRecord,
        payment: PaymentRecord,
    ) -> StorefrontResult<OrderCreatedConfirmation> {
        if let Some(order_id) = cart_wrapper.order_id() {
            return Err(StorefrontError::DuplicateSubmission {
                order_id: order_id.to_string(),
            });
        }

        let provider = payment.provider_name();
        let request = self.build_submission(cart_wrapper, customer, payment);
        let confirmation = self.commerce.create_order(&request).await?;

        self.store
            .attach_order_id(&cart_wrapper.id, &confirmation.id)
            .await?;

        info!(
            "Order '{}' created for cart '{}' (provider: {})",
            confirmation.id, cart_wrapper.id, provider
        );

        Ok(confirmation)
    }

    /// Reshape the cart into the commerce API's order payload. The
    /// idempotency key is derived from the cart id so a re-push for the
    /// same cart is at most once upstream.
    fn build_submission(
        &self,
        cart_wrapper: &CartWrapper,
        customer: CustomerRecord,
        payment: PaymentRecord,
    ) -> OrderSubmissionRequest {
        let cart = &cart_wrapper.cart;

        let items = cart
            .items
            .iter()
            .map(|item| OrderItem {
                sku: item.sku.clone(),
                name: item.display_name().to_string(),
                quantity: item.quantity,
                image_url: item.image_url.clone().unwrap_or_default(),
                price: OrderPrice {
                    gross: item.price.gross,
                    net: item.price.net,
                    currency: self.currency,
                    tax: Tax::vat(tax_percent(item.price.gross, item.price.net)),
                },
            })
            .collect();

        OrderSubmissionRequest {
            customer,
            cart: items,
            total: OrderTotal {
                currency: self.currency,
                gross: cart.total.gross,
                net: cart.total.net,
                tax: Tax::vat(tax_percent(cart.total.gross, cart.total.net)),
            },
            payment: vec![payment],
            idempotency_key: Some(cart_wrapper.id.clone()),
        }
    }
}

/// Build the customer record for an order from the raw fields on the
/// cart wrapper. Pure and total: missing fields resolve to the fixed
/// demo placeholders, and both address entries are populated from the
/// same single-address source fields.
pub fn build_customer_record(cart_wrapper: &CartWrapper) -> CustomerRecord {
    let customer = cart_wrapper.customer.clone().unwrap_or_default();

    let address = |kind: AddressKind| Address {
        kind,
        street: customer
            .street_address
            .clone()
            .unwrap_or_else(|| defaults::STREET.to_string()),
        city: customer
            .city
            .clone()
            .unwrap_or_else(|| defaults::CITY.to_string()),
        country: defaults::COUNTRY.to_string(),
        state: defaults::STATE.to_string(),
        postal_code: customer
            .zip_code
            .clone()
            .unwrap_or_else(|| defaults::POSTAL_CODE.to_string()),
    };

    CustomerRecord {
        identifier: customer.identifier.clone().unwrap_or_default(),
        first_name: customer
            .firstname
            .clone()
            .unwrap_or_else(|| defaults::FIRST_NAME.to_string()),
        last_name: customer
            .lastname
            .clone()
            .unwrap_or_else(|| defaults::LAST_NAME.to_string()),
        company_name: customer
            .company
            .clone()
            .unwrap_or_else(|| defaults::COMPANY.to_string()),
        addresses: vec![address(AddressKind::Billing), address(AddressKind::Delivery)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{Cart, CartExtra, CartItem, CustomerDetails, Price};
    use crate::commerce::CommerceClient;
    use crate::order::{CustomPayment, CustomProperty};
    use crate::store::CartStore;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct MemStore {
        carts: Mutex<HashMap<String, CartWrapper>>,
    }

    impl MemStore {
        fn with(wrapper: CartWrapper) -> Arc<Self> {
            let mut carts = HashMap::new();
            carts.insert(wrapper.id.clone(), wrapper);
            Arc::new(Self {
                carts: Mutex::new(carts),
            })
        }

        fn order_id_of(&self, cart_id: &str) -> Option<String> {
            self.carts
                .lock()
                .unwrap()
                .get(cart_id)
                .and_then(|w| w.extra.order_id.clone())
        }
    }

    #[async_trait]
    impl CartStore for MemStore {
        async fn find(&self, cart_id: &str) -> StorefrontResult<Option<CartWrapper>> {
            Ok(self.carts.lock().unwrap().get(cart_id).cloned())
        }

        async fn attach_order_id(&self, cart_id: &str, order_id: &str) -> StorefrontResult<()> {
            let mut carts = self.carts.lock().unwrap();
            let wrapper = carts
                .get_mut(cart_id)
                .ok_or_else(|| StorefrontError::CartNotFound {
                    cart_id: cart_id.to_string(),
                })?;
            wrapper.extra.order_id = Some(order_id.to_string());
            Ok(())
        }
    }

    struct RecordingCommerce {
        calls: AtomicUsize,
        last_request: Mutex<Option<OrderSubmissionRequest>>,
    }

    impl RecordingCommerce {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl CommerceClient for RecordingCommerce {
        async fn create_order(
            &self,
            request: &OrderSubmissionRequest,
        ) -> StorefrontResult<OrderCreatedConfirmation> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            Ok(OrderCreatedConfirmation {
                id: "ord_123".to_string(),
                created_at: None,
            })
        }
    }

    fn sample_wrapper() -> CartWrapper {
        CartWrapper {
            id: "cart-1".to_string(),
            cart: Cart {
                items: vec![CartItem {
                    sku: "chair-red".to_string(),
                    name: None,
                    quantity: 2,
                    image_url: None,
                    price: Price::new(100.0, 80.0),
                }],
                total: Price::new(100.0, 80.0),
            },
            customer: None,
            extra: CartExtra::default(),
        }
    }

    fn custom_payment() -> PaymentRecord {
        PaymentRecord::Custom {
            custom: CustomPayment {
                properties: vec![CustomProperty {
                    property: "payment_method".to_string(),
                    value: "Crystal Coin".to_string(),
                }],
            },
        }
    }

    #[test]
    fn test_tax_percent_formula() {
        // (80 / 100 - 1) * 100 = -20; net/gross ordering is the upstream contract
        assert!((tax_percent(100.0, 80.0) + 20.0).abs() < 1e-9);
        // exact when the ratio is binary-representable
        assert_eq!(tax_percent(100.0, 75.0), -25.0);
        assert_eq!(tax_percent(0.0, 80.0), 0.0);
    }

    #[tokio::test]
    async fn test_submit_attaches_order_id() {
        let wrapper = sample_wrapper();
        let store = MemStore::with(wrapper.clone());
        let commerce = RecordingCommerce::new();
        let adapter =
            OrderSubmissionAdapter::new(store.clone(), commerce.clone(), Currency::EUR);

        let customer = build_customer_record(&wrapper);
        let confirmation = adapter
            .submit_order(&wrapper, customer, custom_payment())
            .await
            .unwrap();

        assert_eq!(confirmation.id, "ord_123");
        assert_eq!(store.order_id_of("cart-1"), Some("ord_123".to_string()));
        assert_eq!(commerce.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_duplicate_submission_rejected_without_commerce_call() {
        let mut wrapper = sample_wrapper();
        wrapper.extra.order_id = Some("ord_existing".to_string());
        let store = MemStore::with(wrapper.clone());
        let commerce = RecordingCommerce::new();
        let adapter =
            OrderSubmissionAdapter::new(store, commerce.clone(), Currency::EUR);

        let customer = build_customer_record(&wrapper);
        let err = adapter
            .submit_order(&wrapper, customer, custom_payment())
            .await
            .unwrap_err();

        match &err {
            StorefrontError::DuplicateSubmission { order_id } => {
                assert_eq!(order_id, "ord_existing");
            }
            other => panic!("expected DuplicateSubmission, got {other:?}"),
        }
        assert_eq!(commerce.calls.load(Ordering::SeqCst), 0);
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_submission_payload_shape() {
        let wrapper = sample_wrapper();
        let store = MemStore::with(wrapper.clone());
        let commerce = RecordingCommerce::new();
        let adapter =
            OrderSubmissionAdapter::new(store, commerce.clone(), Currency::EUR);

        let customer = build_customer_record(&wrapper);
        adapter
            .submit_order(&wrapper, customer, custom_payment())
            .await
            .unwrap();

        let request = commerce.last_request.lock().unwrap().clone().unwrap();

        // name falls back to SKU, image URL to empty string
        assert_eq!(request.cart[0].name, "chair-red");
        assert_eq!(request.cart[0].image_url, "");

        // currency fixed to the configured value on items and total
        assert_eq!(request.cart[0].price.currency, Currency::EUR);
        assert_eq!(request.total.currency, Currency::EUR);
        assert_eq!(request.total.tax.name, "VAT");
        assert!((request.total.tax.percent + 20.0).abs() < 1e-9);

        // single payment record; idempotency key derived from the cart id
        assert_eq!(request.payment.len(), 1);
        assert_eq!(request.idempotency_key.as_deref(), Some("cart-1"));
    }

    #[test]
    fn test_customer_record_placeholders_for_empty_customer() {
        let wrapper = sample_wrapper();
        let record = build_customer_record(&wrapper);

        assert_eq!(record.identifier, "");
        assert_eq!(record.first_name, "William");
        assert_eq!(record.last_name, "Wallace");
        assert_eq!(record.company_name, "Freedom Inc.");
        assert_eq!(record.addresses.len(), 2);
        assert_eq!(record.addresses[0].kind, AddressKind::Billing);
        assert_eq!(record.addresses[1].kind, AddressKind::Delivery);
        assert_eq!(record.addresses[0].street, "845 Market St");
        assert_eq!(record.addresses[1].postal_code, "94103");
    }

    #[test]
    fn test_customer_record_uses_populated_fields() {
        let mut wrapper = sample_wrapper();
        wrapper.customer = Some(CustomerDetails {
            identifier: Some("cust-9".to_string()),
            firstname: Some("Ada".to_string()),
            lastname: Some("Lovelace".to_string()),
            company: Some("Analytical Engines".to_string()),
            street_address: Some("12 Byron Rd".to_string()),
            city: Some("London".to_string()),
            zip_code: Some("NW1".to_string()),
        });

        let record = build_customer_record(&wrapper);

        assert_eq!(record.identifier, "cust-9");
        assert_eq!(record.first_name, "Ada");
        assert_eq!(record.last_name, "Lovelace");
        assert_eq!(record.company_name, "Analytical Engines");
        for address in &record.addresses {
            assert_eq!(address.street, "12 Byron Rd");
            assert_eq!(address.city, "London");
            assert_eq!(address.postal_code, "NW1");
        }
    }
}
