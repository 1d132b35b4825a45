//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (remote service reachable)
//!
//! # Cart (session-backed)
//! GET  /cart                   - Cart snapshot (lines + computed total)
//! POST /cart/add               - Add a line (merges quantity per product)
//! POST /cart/update            - Set a line's quantity
//! POST /cart/remove            - Remove a line
//! GET  /cart/count             - Cart count badge
//!
//! # Checkout
//! GET  /checkout/draft         - Saved shipping draft (defaults if none)
//! PUT  /checkout/draft         - Persist the shipping draft (best-effort)
//! POST /checkout/place-order   - Validate, write the order, hand off
//!
//! # Auth
//! POST /auth/login             - Sign in, keep the access token in session
//! POST /auth/register          - Register a new account
//! POST /auth/logout            - Drop the access token
//! GET  /auth/me                - Current identity
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/draft",
            get(checkout::get_draft).put(checkout::put_draft),
        )
        .route("/place-order", post(checkout::place_order))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .nest("/auth", auth_routes())
}
