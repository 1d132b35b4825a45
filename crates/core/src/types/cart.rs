//! Cart line items and the derived cart snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// Reasons a cart line is rejected where cart data enters the workflow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartLineError {
    /// The product id is blank.
    #[error("product id cannot be empty")]
    EmptyId,
    /// The product name is blank.
    #[error("product name cannot be empty")]
    EmptyName,
    /// Quantity below the minimum of one.
    #[error("quantity must be at least 1")]
    InvalidQty,
    /// Negative prices are never valid.
    #[error("price cannot be negative")]
    NegativePrice,
}

/// One selected product in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub qty: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CartLine {
    /// Check the line invariants: non-empty id and name, qty >= 1,
    /// price >= 0.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn check(&self) -> Result<(), CartLineError> {
        if self.id.as_str().trim().is_empty() {
            return Err(CartLineError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(CartLineError::EmptyName);
        }
        if self.qty < 1 {
            return Err(CartLineError::InvalidQty);
        }
        if self.price < Decimal::ZERO {
            return Err(CartLineError::NegativePrice);
        }
        Ok(())
    }

    /// Line total: price x quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.qty)
    }
}

/// Read-only view of the current cart: ordered lines plus computed total.
///
/// Derived data - rebuilt on every read so the total can never drift from
/// the lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSnapshot {
    pub items: Vec<CartLine>,
    pub total: Decimal,
}

impl CartSnapshot {
    /// Build a snapshot from the current lines, computing the total.
    #[must_use]
    pub fn new(items: Vec<CartLine>) -> Self {
        let total = items.iter().map(CartLine::line_total).sum();
        Self { items, total }
    }

    /// True when the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
