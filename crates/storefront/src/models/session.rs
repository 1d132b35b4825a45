//! Session-related types.
//!
//! Everything the storefront remembers about a visitor lives in the
//! session: their cart lines, their shipping draft, and - once they log
//! in - the access token the remote service issued.

/// Session keys for visitor state.
pub mod keys {
    /// Key for the remote service access token of the logged-in customer.
    pub const ACCESS_TOKEN: &str = "access_token";

    /// Key for the cart lines.
    pub const CART_LINES: &str = "cart_lines";

    /// Key for the persisted shipping draft.
    pub const SHIPPING_DRAFT: &str = "konaseema_shipping_v1";

    /// Key for the submit-in-flight flag on the checkout.
    pub const CHECKOUT_SAVING: &str = "checkout_saving";
}
