//! Konaseema Core - Shared types library.
//!
//! This crate provides the common types used across the Konaseema
//! storefront components:
//!
//! - `storefront` - Public-facing shop with cart and checkout
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, shipping details, cart lines, order status,
//!   and money formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
