//! Wire types for the remote service boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use konaseema_core::{AddressId, CartLine, OrderId, OrderStatus, ShippingDetails, UserId};

/// Authenticated identity returned by the auth endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
}

/// Session established by a password sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: AuthUser,
}

/// Insert payload for the `addresses` collection.
#[derive(Debug, Clone, Serialize)]
pub struct NewAddress {
    pub user_id: UserId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address_line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl NewAddress {
    /// Build the row from validated shipping details: every field trimmed,
    /// blank line 2 stored as an absent column, blank country falling back
    /// to the form default.
    #[must_use]
    pub fn from_shipping(user_id: &UserId, shipping: &ShippingDetails) -> Self {
        let country = shipping.country.trim();
        Self {
            user_id: user_id.clone(),
            full_name: shipping.full_name.trim().to_owned(),
            email: shipping.email.trim().to_owned(),
            phone: shipping.phone.trim().to_owned(),
            address_line1: shipping.address1.trim().to_owned(),
            address_line2: shipping.address2_opt().map(str::to_owned),
            city: shipping.city.trim().to_owned(),
            state: shipping.state.trim().to_owned(),
            postal_code: shipping.zip.trim().to_owned(),
            country: if country.is_empty() {
                ShippingDetails::DEFAULT_COUNTRY.to_owned()
            } else {
                country.to_owned()
            },
        }
    }
}

/// Insert payload for the `orders` collection.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub user_id: UserId,
    pub address_id: AddressId,
    pub status: OrderStatus,
    pub currency: &'static str,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Insert payload for the `order_items` collection.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrderItem {
    pub order_id: OrderId,
    pub product_id: String,
    pub name: String,
    pub price: Decimal,
    pub qty: u32,
}

impl NewOrderItem {
    /// Build the row for one cart line, with the product id stringified.
    #[must_use]
    pub fn from_line(order_id: &OrderId, line: &CartLine) -> Self {
        Self {
            order_id: order_id.clone(),
            product_id: line.id.to_string(),
            name: line.name.clone(),
            price: line.price,
            qty: line.qty,
        }
    }
}

/// Created-row representation read back from inserts.
#[derive(Debug, Clone, Deserialize)]
pub struct InsertedRow {
    pub id: RowId,
}

/// Row ids arrive as uuid strings or bigints depending on the table; both
/// surface as strings from here on.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Text(String),
    Number(i64),
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(id) => f.write_str(id),
            Self::Number(id) => write!(f, "{id}"),
        }
    }
}
