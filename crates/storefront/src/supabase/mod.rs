//! Remote backend service client (hosted auth + REST data API).
//!
//! # Architecture
//!
//! - The hosted service is the source of truth for identities and order
//!   data - NO local database, direct API calls only
//! - Auth endpoints (`/auth/v1/*`) establish and resolve identities
//! - Data endpoints (`/rest/v1/<table>`) insert rows scoped to the bearer
//!   identity; per-identity write isolation is enforced server-side
//! - Order placement is a sequence of three dependent inserts with no
//!   transaction across them; the submitter aborts on the first failure
//!   and never deletes earlier rows
//!
//! # Example
//!
//! ```rust,ignore
//! use konaseema_storefront::supabase::SupabaseClient;
//!
//! let client = SupabaseClient::new(&config.supabase)?;
//!
//! let session = client.sign_in("priya@example.com", &password).await?;
//! let address_id = client
//!     .insert_address(&session.access_token, &new_address)
//!     .await?;
//! ```

mod client;
pub mod types;

pub use client::SupabaseClient;
pub use types::*;

use std::future::Future;

use konaseema_core::{AddressId, OrderId, UserId};
use thiserror::Error;

/// Errors that can occur when talking to the remote service.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl SupabaseError {
    /// The message to surface to the customer, verbatim for API errors.
    #[must_use]
    pub fn remote_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Contract the order submitter drives against the remote service.
///
/// The three insert operations are sequential and dependent: each needs
/// the identifier produced by the previous one. Tests substitute a
/// recording stub to assert that ordering.
pub trait CheckoutBackend {
    /// Resolve the identity behind a bearer token. `Ok(None)` means the
    /// token is missing or rejected, not a transport failure.
    fn current_user(
        &self,
        access_token: &str,
    ) -> impl Future<Output = Result<Option<UserId>, SupabaseError>> + Send;

    /// Insert one address row tied to the identity, returning its id.
    fn insert_address(
        &self,
        access_token: &str,
        address: &NewAddress,
    ) -> impl Future<Output = Result<AddressId, SupabaseError>> + Send;

    /// Insert one order row referencing a created address, returning its id.
    fn insert_order(
        &self,
        access_token: &str,
        order: &NewOrder,
    ) -> impl Future<Output = Result<OrderId, SupabaseError>> + Send;

    /// Insert one row per cart line referencing a created order.
    fn insert_order_items(
        &self,
        access_token: &str,
        items: &[NewOrderItem],
    ) -> impl Future<Output = Result<(), SupabaseError>> + Send;
}

/// Pull the human-readable message out of an error response body.
///
/// The auth and data endpoints use different JSON shapes for errors; try
/// the known keys before falling back to the raw body.
fn remote_error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error_description", "msg", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str())
                && !text.is_empty()
            {
                return text.to_owned();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {status}")
    } else {
        trimmed.chars().take(200).collect()
    }
}
