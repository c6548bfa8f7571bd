// src/services/backend.rs
//! REST client for the hosted auth/persistence backend
//!
//! Speaks the Supabase-compatible endpoints: GoTrue for auth
//! (`/auth/v1/*`) and PostgREST for the `spots` table (`/rest/v1/spots`).
//! Every request carries the anon key in the `apikey` header.

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, warn};

use crate::common::config::BackendConfig;
use crate::common::ApiError;
use crate::spots::models::SpotRow;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Backend not configured: {0}")]
    NotConfigured(String),
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<BackendError> for ApiError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::NotConfigured(msg) => ApiError::ServiceUnavailable(msg),
            BackendError::Rejected { message, .. } => ApiError::BackendError(message),
            other => ApiError::BackendError(other.to_string()),
        }
    }
}

/// Identity as reported by the backend
#[derive(Debug, Clone, Deserialize)]
pub struct BackendUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Result of a password grant
#[derive(Debug, Clone, Deserialize)]
pub struct BackendSession {
    pub access_token: String,
    pub user: BackendUser,
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    url: Option<String>,
    anon_key: Option<String>,
}

impl BackendClient {
    pub fn new(client: Client, config: &BackendConfig) -> Self {
        Self {
            client,
            url: config.url.clone(),
            anon_key: config.anon_key.clone(),
        }
    }

    fn request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<RequestBuilder, BackendError> {
        let base = self
            .url
            .as_deref()
            .ok_or_else(|| BackendError::NotConfigured("BACKEND_URL is not set".to_string()))?;
        let key = self.anon_key.as_deref().ok_or_else(|| {
            BackendError::NotConfigured("BACKEND_ANON_KEY is not set".to_string())
        })?;

        Ok(self
            .client
            .request(method, format!("{}{}", base, path))
            .header("apikey", key))
    }

    /// POST /auth/v1/signup
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<(), BackendError> {
        let resp = self
            .request(reqwest::Method::POST, "/auth/v1/signup")?
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        check_status(resp).await?;
        debug!("Backend accepted sign-up");
        Ok(())
    }

    /// POST /auth/v1/token?grant_type=password
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<BackendSession, BackendError> {
        let resp = self
            .request(reqwest::Method::POST, "/auth/v1/token?grant_type=password")?
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let resp = check_status(resp).await?;
        resp.json::<BackendSession>()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    /// GET /auth/v1/user for the bearer token
    pub async fn get_user(&self, access_token: &str) -> Result<BackendUser, BackendError> {
        let resp = self
            .request(reqwest::Method::GET, "/auth/v1/user")?
            .bearer_auth(access_token)
            .send()
            .await?;
        let resp = check_status(resp).await?;
        resp.json::<BackendUser>()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    /// All spot rows for one user, newest first
    pub async fn select_spots(
        &self,
        access_token: Option<&str>,
        user_id: &str,
    ) -> Result<Vec<SpotRow>, BackendError> {
        let user_filter = format!("eq.{}", user_id);
        let mut req = self
            .request(reqwest::Method::GET, "/rest/v1/spots")?
            .query(&[
                ("select", "*"),
                ("user_id", user_filter.as_str()),
                ("order", "created_at.desc"),
            ]);
        if let Some(token) = access_token {
            req = req.bearer_auth(token);
        }

        let resp = check_status(req.send().await?).await?;
        resp.json::<Vec<SpotRow>>()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    pub async fn insert_spot(
        &self,
        access_token: Option<&str>,
        row: &SpotRow,
    ) -> Result<(), BackendError> {
        let mut req = self
            .request(reqwest::Method::POST, "/rest/v1/spots")?
            .header("Prefer", "return=minimal")
            .json(row);
        if let Some(token) = access_token {
            req = req.bearer_auth(token);
        }

        check_status(req.send().await?).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into `BackendError::Rejected` carrying the
/// backend's own message
async fn check_status(resp: Response) -> Result<Response, BackendError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| extract_error_message(&v))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    if status.is_server_error() {
        error!(http_status = %status, message = %message, "Backend request failed");
    } else {
        warn!(http_status = %status, message = %message, "Backend rejected request");
    }

    Err(BackendError::Rejected {
        status: status.as_u16(),
        message,
    })
}

/// Pick the human-readable message out of a backend error body
pub fn extract_error_message(body: &serde_json::Value) -> Option<String> {
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}
