//! Checkout route handlers.
//!
//! The shipping draft is persisted on every change and read back once at
//! submit time. Placing an order runs the full workflow: validation gate,
//! the three dependent remote writes, then the WhatsApp hand-off link.

use axum::{Json, extract::State, http::StatusCode};
use rust_decimal::Decimal;
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use konaseema_core::{OrderId, ShippingDetails};

use crate::checkout::{
    SubmitError, compose_order_message, load_draft, store_draft, submit, validate, whatsapp_link,
};
use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::state::AppState;

use super::cart;

/// Response for a successfully placed order.
#[derive(Debug, Serialize)]
pub struct PlaceOrderResponse {
    pub success: bool,
    pub order_id: OrderId,
    pub total: Decimal,
    /// Human-readable order summary (the hand-off message, unencoded).
    pub message: String,
    /// Deep link that opens WhatsApp with the summary pre-filled.
    pub whatsapp_url: String,
}

/// Read the saved shipping draft (defaults when absent).
///
/// GET /checkout/draft
#[instrument(skip(session))]
pub async fn get_draft(session: Session) -> Json<ShippingDetails> {
    Json(load_draft(&session).await)
}

/// Persist the shipping draft. Best-effort: a failed write is logged and
/// the editing flow continues.
///
/// PUT /checkout/draft
#[instrument(skip(session, shipping))]
pub async fn put_draft(session: Session, Json(shipping): Json<ShippingDetails>) -> StatusCode {
    if let Err(err) = store_draft(&session, &shipping).await {
        tracing::warn!(error = %err, "failed to persist shipping draft");
    }
    StatusCode::NO_CONTENT
}

/// Place the order.
///
/// POST /checkout/place-order
///
/// Only one submission may be in flight per session; the saving flag
/// mirrors the disabled submit button. There is no timeout and no
/// cancellation once the writes start.
#[instrument(skip(state, session))]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<PlaceOrderResponse>> {
    let saving = session
        .get::<bool>(session_keys::CHECKOUT_SAVING)
        .await
        .ok()
        .flatten()
        .unwrap_or(false);
    if saving {
        return Err(AppError::SubmitInFlight);
    }
    if let Err(err) = session.insert(session_keys::CHECKOUT_SAVING, true).await {
        tracing::warn!(error = %err, "failed to set saving flag");
    }

    let result = run_place_order(&state, &session).await;

    if let Err(err) = session.remove::<bool>(session_keys::CHECKOUT_SAVING).await {
        tracing::warn!(error = %err, "failed to clear saving flag");
    }

    result.map(Json)
}

/// The submission itself, separated so the saving flag is always cleared.
async fn run_place_order(state: &AppState, session: &Session) -> Result<PlaceOrderResponse> {
    let shipping = load_draft(session).await;
    let snapshot = cart::snapshot(session).await;

    if snapshot.is_empty() {
        return Err(AppError::Submit(SubmitError::EmptyCart));
    }

    let errors = validate(&shipping);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let Some(token) = session
        .get::<String>(session_keys::ACCESS_TOKEN)
        .await
        .ok()
        .flatten()
    else {
        return Err(AppError::Submit(SubmitError::AuthRequired));
    };

    let placed = submit(state.supabase(), &token, &snapshot, &shipping).await?;

    let message = compose_order_message(&placed.order_id, &snapshot, &shipping);
    let whatsapp_url = whatsapp_link(&state.config().whatsapp_number, &message);

    Ok(PlaceOrderResponse {
        success: true,
        order_id: placed.order_id,
        total: placed.total,
        message,
        whatsapp_url,
    })
}
