//! Best-effort persistence of the shipping form between visits.
//!
//! The draft lives under one session key as JSON. Persistence failures
//! are logged and tolerated - losing a draft costs the customer some
//! retyping, never an order.

use thiserror::Error;
use tower_sessions::Session;

use konaseema_core::ShippingDetails;

use crate::models::session_keys;

/// Draft persistence failed; the form keeps working without it.
#[derive(Debug, Error)]
#[error("draft store error: {0}")]
pub struct DraftError(#[from] tower_sessions::session::Error);

/// Load the saved draft, falling back to defaults when absent, malformed,
/// or unreadable.
pub async fn load_draft(session: &Session) -> ShippingDetails {
    match session
        .get::<serde_json::Value>(session_keys::SHIPPING_DRAFT)
        .await
    {
        Ok(value) => parse_draft(value),
        Err(err) => {
            tracing::warn!(error = %err, "failed to read shipping draft, using defaults");
            ShippingDetails::default()
        }
    }
}

/// Persist the draft.
///
/// # Errors
///
/// Returns `DraftError` when the session store rejects the write; callers
/// log it and continue.
pub async fn store_draft(session: &Session, shipping: &ShippingDetails) -> Result<(), DraftError> {
    session
        .insert(session_keys::SHIPPING_DRAFT, shipping)
        .await?;
    Ok(())
}

/// Lenient draft parse: anything that does not deserialize cleanly is a
/// default form, not an error.
fn parse_draft(value: Option<serde_json::Value>) -> ShippingDetails {
    value
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}
