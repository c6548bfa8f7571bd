//! Seam between the auth handlers and the external auth service

use async_trait::async_trait;
use tracing::debug;

use super::models::SessionUser;
use crate::common::ApiError;
use crate::services::backend::{BackendClient, BackendError, BackendUser};

#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), ApiError>;

    /// Password sign-in, returning the access token and the identity
    async fn sign_in(&self, email: &str, password: &str)
        -> Result<(String, SessionUser), ApiError>;

    /// Resolve an access token to its identity (the session check)
    async fn get_user(&self, access_token: &str) -> Result<SessionUser, ApiError>;
}

impl From<BackendUser> for SessionUser {
    fn from(user: BackendUser) -> Self {
        SessionUser {
            id: user.id,
            email: user.email.unwrap_or_default(),
        }
    }
}

/// Auth rejections are shown to the user as-is
fn auth_error(e: BackendError) -> ApiError {
    match e {
        BackendError::Rejected { message, .. } => ApiError::AuthFailed(message),
        other => ApiError::from(other),
    }
}

#[async_trait]
impl AuthBackend for BackendClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), ApiError> {
        BackendClient::sign_up(self, email, password)
            .await
            .map_err(auth_error)
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(String, SessionUser), ApiError> {
        let session = self
            .sign_in_with_password(email, password)
            .await
            .map_err(auth_error)?;
        debug!(user_id = %session.user.id, "Backend issued session");
        Ok((session.access_token, session.user.into()))
    }

    async fn get_user(&self, access_token: &str) -> Result<SessionUser, ApiError> {
        BackendClient::get_user(self, access_token)
            .await
            .map(SessionUser::from)
            .map_err(|e| match e {
                BackendError::Rejected { message, .. } => ApiError::Unauthorized(message),
                other => ApiError::from(other),
            })
    }
}
