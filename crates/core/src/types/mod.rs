//! Core types for the Konaseema storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod money;
pub mod shipping;
pub mod status;

pub use cart::{CartLine, CartLineError, CartSnapshot};
pub use id::*;
pub use money::{CURRENCY, RUPEE_SIGN, format_inr};
pub use shipping::ShippingDetails;
pub use status::OrderStatus;
