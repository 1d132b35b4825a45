//! Remote service client implementation.
//!
//! One `reqwest::Client` with the project's anonymous key as a default
//! header; per-request bearer tokens carry the customer identity.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use konaseema_core::{AddressId, OrderId, UserId};

use crate::config::SupabaseConfig;
use crate::supabase::types::{AuthSession, AuthUser, InsertedRow, NewAddress, NewOrder, NewOrderItem};
use crate::supabase::{CheckoutBackend, SupabaseError, remote_error_message};

/// Client for the hosted auth and data APIs.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<SupabaseClientInner>,
}

struct SupabaseClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl SupabaseClient {
    /// Create a new client for the configured project.
    ///
    /// # Errors
    ///
    /// Returns error if the anon key is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &SupabaseConfig) -> Result<Self, SupabaseError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&config.anon_key)
                .map_err(|e| SupabaseError::Parse(format!("Invalid anon key format: {e}")))?,
        );

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            inner: Arc::new(SupabaseClientInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_owned(),
            }),
        })
    }

    /// Exchange email + password for a session.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the credentials are rejected.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthSession, SupabaseError> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.inner.base_url);
        let body = serde_json::json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let response = self.inner.client.post(&url).json(&body).send().await?;
        read_json(response).await
    }

    /// Register a new account.
    ///
    /// Depending on project settings the account may need email
    /// confirmation before it can sign in.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the sign-up is rejected.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_up(&self, email: &str, password: &SecretString) -> Result<(), SupabaseError> {
        let url = format!("{}/auth/v1/signup", self.inner.base_url);
        let body = serde_json::json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let response = self.inner.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(api_error(status, response).await);
        }

        Ok(())
    }

    /// Resolve the identity behind a bearer token.
    ///
    /// A rejected or expired token is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns error on transport failures or unexpected responses.
    #[instrument(skip(self, access_token))]
    pub async fn user_for_token(&self, access_token: &str) -> Result<Option<AuthUser>, SupabaseError> {
        let url = format!("{}/auth/v1/user", self.inner.base_url);

        let response = self
            .inner
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }

        let user: AuthUser = read_json(response).await?;
        Ok(Some(user))
    }

    /// Check that the remote service is reachable.
    ///
    /// # Errors
    ///
    /// Returns error if the health endpoint cannot be reached or reports
    /// a failure.
    pub async fn health(&self) -> Result<(), SupabaseError> {
        let url = format!("{}/auth/v1/health", self.inner.base_url);

        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(api_error(status, response).await);
        }

        Ok(())
    }

    /// Insert rows into a collection, reading back the created rows.
    async fn insert_rows<T: Serialize + ?Sized>(
        &self,
        access_token: &str,
        table: &str,
        payload: &T,
    ) -> Result<Vec<InsertedRow>, SupabaseError> {
        let url = format!("{}/rest/v1/{table}", self.inner.base_url);

        let response = self
            .inner
            .client
            .post(&url)
            .bearer_auth(access_token)
            .header("Prefer", "return=representation")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status, response).await);
        }

        response
            .json()
            .await
            .map_err(|e| SupabaseError::Parse(e.to_string()))
    }

    /// First created row of an insert, for single-row payloads.
    async fn insert_one<T: Serialize>(
        &self,
        access_token: &str,
        table: &str,
        payload: &T,
    ) -> Result<InsertedRow, SupabaseError> {
        self.insert_rows(access_token, table, payload)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SupabaseError::Parse(format!("{table} insert returned no rows")))
    }
}

impl CheckoutBackend for SupabaseClient {
    async fn current_user(&self, access_token: &str) -> Result<Option<UserId>, SupabaseError> {
        Ok(self
            .user_for_token(access_token)
            .await?
            .map(|user| user.id))
    }

    async fn insert_address(
        &self,
        access_token: &str,
        address: &NewAddress,
    ) -> Result<AddressId, SupabaseError> {
        let row = self.insert_one(access_token, "addresses", address).await?;
        Ok(AddressId::new(row.id.to_string()))
    }

    async fn insert_order(
        &self,
        access_token: &str,
        order: &NewOrder,
    ) -> Result<OrderId, SupabaseError> {
        let row = self.insert_one(access_token, "orders", order).await?;
        Ok(OrderId::new(row.id.to_string()))
    }

    async fn insert_order_items(
        &self,
        access_token: &str,
        items: &[NewOrderItem],
    ) -> Result<(), SupabaseError> {
        self.insert_rows(access_token, "order_items", items).await?;
        Ok(())
    }
}

/// Turn a non-success response into an API error with the remote message.
async fn api_error(status: StatusCode, response: reqwest::Response) -> SupabaseError {
    let body = response.text().await.unwrap_or_default();
    SupabaseError::Api {
        status: status.as_u16(),
        message: remote_error_message(status.as_u16(), &body),
    }
}

/// Read a success response as JSON, or a failure as an API error.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, SupabaseError> {
    let status = response.status();

    if !status.is_success() {
        return Err(api_error(status, response).await);
    }

    response
        .json()
        .await
        .map_err(|e| SupabaseError::Parse(e.to_string()))
}
