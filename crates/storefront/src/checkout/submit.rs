//! Order submission: the three dependent writes against the remote
//! service.
//!
//! Single attempt, no retries, no rollback. The writes are sequential and
//! dependent - each needs the identifier produced by the previous one -
//! so they cannot be reordered or parallelized.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::instrument;

use konaseema_core::{CartSnapshot, OrderId, OrderStatus, ShippingDetails};

use crate::supabase::{CheckoutBackend, NewAddress, NewOrder, NewOrderItem};

/// Ways a submission attempt fails. `Display` is the customer-facing
/// message; remote failures carry the service's message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// No authenticated identity at submit time.
    #[error("Please login to place the order.")]
    AuthRequired,

    /// Zero cart lines.
    #[error("Your cart is empty.")]
    EmptyCart,

    /// One of the three inserts was rejected; earlier writes stand.
    #[error("{0}")]
    Remote(String),
}

/// A successfully placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub order_id: OrderId,
    pub total: Decimal,
}

/// Place the order: resolve the identity, then write address, order, and
/// order items in that sequence.
///
/// The caller has already validated the shipping form and checked the
/// cart; both are re-checked here so the invariants hold for every
/// caller. Aborts on the first failed write - earlier successful writes
/// are not rolled back.
///
/// # Errors
///
/// - [`SubmitError::EmptyCart`] when the cart has no lines
/// - [`SubmitError::AuthRequired`] when the token resolves to no identity;
///   no write is attempted
/// - [`SubmitError::Remote`] when an insert fails, carrying the remote
///   message verbatim
#[instrument(skip_all, fields(items = cart.items.len()))]
pub async fn submit<B: CheckoutBackend + Sync>(
    backend: &B,
    access_token: &str,
    cart: &CartSnapshot,
    shipping: &ShippingDetails,
) -> Result<PlacedOrder, SubmitError> {
    if cart.is_empty() {
        return Err(SubmitError::EmptyCart);
    }

    let user_id = backend
        .current_user(access_token)
        .await
        .map_err(|e| SubmitError::Remote(e.remote_message()))?
        .ok_or(SubmitError::AuthRequired)?;

    let subtotal = cart.total;
    let shipping_fee = Decimal::ZERO;
    let total = subtotal + shipping_fee;

    let address = NewAddress::from_shipping(&user_id, shipping);
    let address_id = backend
        .insert_address(access_token, &address)
        .await
        .map_err(|e| SubmitError::Remote(e.remote_message()))?;

    let order = NewOrder {
        user_id,
        address_id,
        status: OrderStatus::Pending,
        currency: konaseema_core::CURRENCY,
        subtotal,
        shipping: shipping_fee,
        total,
        notes: shipping.delivery_notes_opt().map(str::to_owned),
    };
    let order_id = backend
        .insert_order(access_token, &order)
        .await
        .map_err(|e| SubmitError::Remote(e.remote_message()))?;

    let items: Vec<NewOrderItem> = cart
        .items
        .iter()
        .map(|line| NewOrderItem::from_line(&order_id, line))
        .collect();
    backend
        .insert_order_items(access_token, &items)
        .await
        .map_err(|e| SubmitError::Remote(e.remote_message()))?;

    tracing::info!(order_id = %order_id, total = %total, "order placed");

    Ok(PlacedOrder { order_id, total })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use konaseema_core::{AddressId, CartLine, ProductId, UserId};

    use crate::supabase::SupabaseError;

    use super::*;

    /// Records the order of backend calls and the payloads it saw.
    #[derive(Default)]
    struct StubBackend {
        user: Option<UserId>,
        fail_address: Option<&'static str>,
        fail_order: Option<&'static str>,
        fail_items: Option<&'static str>,
        calls: Mutex<Vec<&'static str>>,
        last_order: Mutex<Option<NewOrder>>,
        last_items: Mutex<Vec<NewOrderItem>>,
    }

    impl StubBackend {
        fn logged_in() -> Self {
            Self {
                user: Some(UserId::new("user-1")),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn unavailable(message: &str) -> SupabaseError {
        SupabaseError::Api {
            status: 503,
            message: message.to_owned(),
        }
    }

    impl CheckoutBackend for StubBackend {
        async fn current_user(
            &self,
            _access_token: &str,
        ) -> Result<Option<UserId>, SupabaseError> {
            self.calls.lock().unwrap().push("current_user");
            Ok(self.user.clone())
        }

        async fn insert_address(
            &self,
            _access_token: &str,
            _address: &NewAddress,
        ) -> Result<AddressId, SupabaseError> {
            self.calls.lock().unwrap().push("insert_address");
            match self.fail_address {
                Some(message) => Err(unavailable(message)),
                None => Ok(AddressId::new("addr-1")),
            }
        }

        async fn insert_order(
            &self,
            _access_token: &str,
            order: &NewOrder,
        ) -> Result<OrderId, SupabaseError> {
            self.calls.lock().unwrap().push("insert_order");
            *self.last_order.lock().unwrap() = Some(order.clone());
            match self.fail_order {
                Some(message) => Err(unavailable(message)),
                None => Ok(OrderId::new("order-1")),
            }
        }

        async fn insert_order_items(
            &self,
            _access_token: &str,
            items: &[NewOrderItem],
        ) -> Result<(), SupabaseError> {
            self.calls.lock().unwrap().push("insert_order_items");
            *self.last_items.lock().unwrap() = items.to_vec();
            match self.fail_items {
                Some(message) => Err(unavailable(message)),
                None => Ok(()),
            }
        }
    }

    fn kaja_cart() -> CartSnapshot {
        CartSnapshot::new(vec![CartLine {
            id: ProductId::new("9"),
            name: "Kaja".to_owned(),
            price: Decimal::from(200),
            qty: 2,
            weight: Some("250g".to_owned()),
            image: None,
            category: None,
        }])
    }

    fn valid_shipping() -> ShippingDetails {
        ShippingDetails {
            full_name: "Priya Sharma".to_owned(),
            email: "priya@example.com".to_owned(),
            phone: "9876543210".to_owned(),
            country: "India".to_owned(),
            address1: "12 Beach Road".to_owned(),
            address2: String::new(),
            city: "Kakinada".to_owned(),
            state: "Andhra Pradesh".to_owned(),
            zip: "533001".to_owned(),
            delivery_notes: String::new(),
        }
    }

    #[tokio::test]
    async fn test_success_writes_in_sequence() {
        let backend = StubBackend::logged_in();

        let placed = submit(&backend, "token", &kaja_cart(), &valid_shipping())
            .await
            .unwrap();

        assert_eq!(placed.order_id, OrderId::new("order-1"));
        assert_eq!(placed.total, Decimal::from(400));
        assert_eq!(
            backend.calls(),
            vec!["current_user", "insert_address", "insert_order", "insert_order_items"]
        );
    }

    #[tokio::test]
    async fn test_order_row_carries_totals_and_status() {
        let backend = StubBackend::logged_in();

        submit(&backend, "token", &kaja_cart(), &valid_shipping())
            .await
            .unwrap();

        let order = backend.last_order.lock().unwrap().clone().unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.currency, "INR");
        assert_eq!(order.subtotal, Decimal::from(400));
        assert_eq!(order.shipping, Decimal::ZERO);
        assert_eq!(order.total, Decimal::from(400));
        assert_eq!(order.notes, None);

        let items = backend.last_items.lock().unwrap().clone();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].order_id, OrderId::new("order-1"));
        assert_eq!(items[0].product_id, "9");
        assert_eq!(items[0].qty, 2);
    }

    #[tokio::test]
    async fn test_no_identity_aborts_before_any_write() {
        let backend = StubBackend::default();

        let err = submit(&backend, "stale-token", &kaja_cart(), &valid_shipping())
            .await
            .unwrap_err();

        assert_eq!(err, SubmitError::AuthRequired);
        assert_eq!(err.to_string(), "Please login to place the order.");
        assert_eq!(backend.calls(), vec!["current_user"]);
    }

    #[tokio::test]
    async fn test_empty_cart_never_reaches_the_backend() {
        let backend = StubBackend::logged_in();
        let empty = CartSnapshot::new(Vec::new());

        let err = submit(&backend, "token", &empty, &valid_shipping())
            .await
            .unwrap_err();

        assert_eq!(err, SubmitError::EmptyCart);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_address_failure_stops_the_sequence() {
        let backend = StubBackend {
            fail_address: Some("db unreachable"),
            ..StubBackend::logged_in()
        };

        let err = submit(&backend, "token", &kaja_cart(), &valid_shipping())
            .await
            .unwrap_err();

        assert_eq!(err, SubmitError::Remote("db unreachable".to_owned()));
        assert_eq!(backend.calls(), vec!["current_user", "insert_address"]);
    }

    #[tokio::test]
    async fn test_order_failure_skips_items() {
        let backend = StubBackend {
            fail_order: Some("orders insert rejected"),
            ..StubBackend::logged_in()
        };

        let err = submit(&backend, "token", &kaja_cart(), &valid_shipping())
            .await
            .unwrap_err();

        assert_eq!(err, SubmitError::Remote("orders insert rejected".to_owned()));
        assert_eq!(
            backend.calls(),
            vec!["current_user", "insert_address", "insert_order"]
        );
    }

    #[tokio::test]
    async fn test_items_failure_surfaces_after_earlier_writes() {
        // Earlier writes are not rolled back; the error still surfaces.
        let backend = StubBackend {
            fail_items: Some("order_items insert rejected"),
            ..StubBackend::logged_in()
        };

        let err = submit(&backend, "token", &kaja_cart(), &valid_shipping())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SubmitError::Remote("order_items insert rejected".to_owned())
        );
        assert_eq!(
            backend.calls(),
            vec!["current_user", "insert_address", "insert_order", "insert_order_items"]
        );
    }

    #[tokio::test]
    async fn test_notes_carried_onto_the_order_row() {
        let backend = StubBackend::logged_in();
        let mut shipping = valid_shipping();
        shipping.delivery_notes = " Ring twice ".to_owned();

        submit(&backend, "token", &kaja_cart(), &shipping)
            .await
            .unwrap();

        let order = backend.last_order.lock().unwrap().clone().unwrap();
        assert_eq!(order.notes.as_deref(), Some("Ring twice"));
    }
}
