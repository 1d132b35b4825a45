//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers should
//! return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::checkout::{FieldErrors, SubmitError};
use crate::supabase::SupabaseError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Remote service call failed outside the submit flow.
    #[error("Supabase error: {0}")]
    Supabase(#[from] SupabaseError),

    /// Order submission failed.
    #[error("{0}")]
    Submit(#[from] SubmitError),

    /// Shipping form failed validation; one message per field.
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// A submission is already running for this session.
    #[error("Order submission already in progress.")]
    SubmitInFlight,

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Supabase(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Supabase(_) => StatusCode::BAD_GATEWAY,
            Self::Submit(err) => match err {
                SubmitError::AuthRequired => StatusCode::UNAUTHORIZED,
                SubmitError::EmptyCart => StatusCode::UNPROCESSABLE_ENTITY,
                SubmitError::Remote(_) => StatusCode::BAD_GATEWAY,
            },
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::SubmitInFlight => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            Self::Validation(errors) => serde_json::json!({
                "success": false,
                "errors": errors,
            }),
            // Don't expose internal error details to clients
            Self::Internal(_) => serde_json::json!({
                "success": false,
                "message": "Internal server error",
            }),
            // Remote messages are surfaced verbatim, as the customer is
            // the one who has to act on them (retry, log in, ...)
            Self::Supabase(err) => serde_json::json!({
                "success": false,
                "message": err.remote_message(),
            }),
            Self::BadRequest(message) | Self::Unauthorized(message) => serde_json::json!({
                "success": false,
                "message": message,
            }),
            other => serde_json::json!({
                "success": false,
                "message": other.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
