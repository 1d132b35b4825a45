//! Cart route handlers.
//!
//! The cart is session state with a defined read/write contract: `lines`
//! reads the raw lines, `snapshot` derives the read-only view with the
//! total recomputed on every read, and every mutation validates lines at
//! the boundary before they enter the workflow.

use axum::Json;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use konaseema_core::{CartLine, CartSnapshot, ProductId};

use crate::error::{AppError, Result};
use crate::models::session_keys;

// =============================================================================
// Session Helpers
// =============================================================================

/// Read the raw cart lines from the session.
pub(crate) async fn lines(session: &Session) -> Vec<CartLine> {
    session
        .get::<Vec<CartLine>>(session_keys::CART_LINES)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Derive the read-only cart view.
pub(crate) async fn snapshot(session: &Session) -> CartSnapshot {
    CartSnapshot::new(lines(session).await)
}

/// Replace the cart lines in the session.
async fn set_lines(session: &Session, lines: &[CartLine]) -> Result<()> {
    session
        .insert(session_keys::CART_LINES, lines)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store cart: {e}")))
}

// =============================================================================
// Handlers
// =============================================================================

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: ProductId,
    pub qty: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: ProductId,
}

/// Cart count badge data.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

/// Display the cart.
///
/// GET /cart
#[instrument(skip(session))]
pub async fn show(session: Session) -> Json<CartSnapshot> {
    Json(snapshot(&session).await)
}

/// Add a line to the cart, merging quantities when the product is already
/// present.
///
/// POST /cart/add
#[instrument(skip(session, line), fields(product = %line.id))]
pub async fn add(session: Session, Json(line): Json<CartLine>) -> Result<Json<CartSnapshot>> {
    line.check()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut current = lines(&session).await;
    match current.iter_mut().find(|existing| existing.id == line.id) {
        Some(existing) => existing.qty = existing.qty.saturating_add(line.qty),
        None => current.push(line),
    }
    set_lines(&session, &current).await?;

    Ok(Json(CartSnapshot::new(current)))
}

/// Set the quantity of a cart line.
///
/// POST /cart/update
#[instrument(skip(session, form), fields(product = %form.id))]
pub async fn update(
    session: Session,
    Json(form): Json<UpdateCartForm>,
) -> Result<Json<CartSnapshot>> {
    if form.qty < 1 {
        return Err(AppError::BadRequest("quantity must be at least 1".to_string()));
    }

    let mut current = lines(&session).await;
    if let Some(existing) = current.iter_mut().find(|existing| existing.id == form.id) {
        existing.qty = form.qty;
    }
    set_lines(&session, &current).await?;

    Ok(Json(CartSnapshot::new(current)))
}

/// Remove a line from the cart.
///
/// POST /cart/remove
#[instrument(skip(session, form), fields(product = %form.id))]
pub async fn remove(
    session: Session,
    Json(form): Json<RemoveFromCartForm>,
) -> Result<Json<CartSnapshot>> {
    let mut current = lines(&session).await;
    current.retain(|existing| existing.id != form.id);
    set_lines(&session, &current).await?;

    Ok(Json(CartSnapshot::new(current)))
}

/// Get the cart count badge (total quantity across lines).
///
/// GET /cart/count
#[instrument(skip(session))]
pub async fn count(session: Session) -> Json<CartCount> {
    let count = lines(&session).await.iter().map(|line| line.qty).sum();
    Json(CartCount { count })
}
