//! Authentication route handlers.
//!
//! Thin pass-through to the remote auth provider: credentials go to the
//! token endpoint, the issued access token is kept in the session, and
//! checkout later resolves the identity from that token. No token refresh
//! is attempted; an expired token simply reads as "not logged in".

use axum::{Json, extract::State};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::checkout::validate::is_valid_email;
use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::state::AppState;
use crate::supabase::{AuthUser, SupabaseError};

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub email: String,
    pub password: SecretString,
    pub full_name: String,
}

/// Response for auth actions.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Current-identity response.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthUser>,
}

/// Sign in with email and password.
///
/// POST /auth/login
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<AuthResponse>> {
    let email = form.email.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }
    if !is_valid_email(&email) {
        return Err(AppError::BadRequest("Enter a valid email".to_string()));
    }
    if form.password.expose_secret().is_empty() {
        return Err(AppError::BadRequest("Password is required".to_string()));
    }

    let auth_session = match state.supabase().sign_in(&email, &form.password).await {
        Ok(auth_session) => auth_session,
        // Rejected credentials surface the provider's message
        Err(err @ SupabaseError::Api { .. }) => {
            return Err(AppError::Unauthorized(err.remote_message()));
        }
        Err(err) => return Err(AppError::Supabase(err)),
    };

    session
        .insert(session_keys::ACCESS_TOKEN, &auth_session.access_token)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store session: {e}")))?;

    tracing::info!(user_id = %auth_session.user.id, "customer signed in");

    Ok(Json(AuthResponse {
        success: true,
        message: None,
    }))
}

/// Register a new account.
///
/// POST /auth/register
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegisterForm>,
) -> Result<Json<AuthResponse>> {
    let email = form.email.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }
    if !is_valid_email(&email) {
        return Err(AppError::BadRequest("Enter a valid email".to_string()));
    }
    if form.password.expose_secret().len() < 6 {
        return Err(AppError::BadRequest(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    if form.full_name.trim().is_empty() {
        return Err(AppError::BadRequest("Full name is required".to_string()));
    }

    match state.supabase().sign_up(&email, &form.password).await {
        Ok(()) => Ok(Json(AuthResponse {
            success: true,
            message: Some("Account created. You can now log in.".to_string()),
        })),
        Err(err @ SupabaseError::Api { .. }) => Err(AppError::BadRequest(err.remote_message())),
        Err(err) => Err(AppError::Supabase(err)),
    }
}

/// Log out: drop the stored access token.
///
/// POST /auth/logout
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<AuthResponse>> {
    session
        .remove::<String>(session_keys::ACCESS_TOKEN)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;

    Ok(Json(AuthResponse {
        success: true,
        message: None,
    }))
}

/// Report the current identity, if any.
///
/// GET /auth/me
#[instrument(skip(state, session))]
pub async fn me(State(state): State<AppState>, session: Session) -> Result<Json<MeResponse>> {
    let token = session
        .get::<String>(session_keys::ACCESS_TOKEN)
        .await
        .ok()
        .flatten();

    let user = match token {
        Some(token) => state.supabase().user_for_token(&token).await?,
        None => None,
    };

    Ok(Json(MeResponse {
        authenticated: user.is_some(),
        user,
    }))
}
