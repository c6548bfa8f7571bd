//! Authentication handlers

use axum::extract::{Extension, Json, Query};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::extractors::AuthedUser;
use super::models::{
    AuthFormQuery, AuthFormView, Credentials, MessageResponse, SessionUser, SignInResponse,
    SIGN_UP_CONFIRMATION,
};
use super::validators::CredentialsValidator;
use crate::common::{safe_email_log, ApiError, AppState, Validator};
use crate::events::AppEvent;

/// GET /api/auth/form?mode=sign_in|sign_up
pub async fn auth_form(Query(query): Query<AuthFormQuery>) -> Json<AuthFormView> {
    Json(AuthFormView::for_mode(query.mode))
}

/// POST /api/auth/sign-up
pub async fn sign_up(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<MessageResponse>, ApiError> {
    let validation = CredentialsValidator.validate(&credentials);
    if !validation.is_valid {
        return Err(ApiError::from(validation));
    }

    let state = state_lock.read().await.clone();
    let email = credentials.email.trim();

    info!(email = %safe_email_log(email), "🔐 Sign-up requested");
    state
        .auth_backend
        .sign_up(email, &credentials.password)
        .await?;

    Ok(Json(MessageResponse {
        message: SIGN_UP_CONFIRMATION.to_string(),
    }))
}

/// POST /api/auth/sign-in
///
/// On success the user's persisted spots are loaded into memory.
pub async fn sign_in(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<SignInResponse>, ApiError> {
    let validation = CredentialsValidator.validate(&credentials);
    if !validation.is_valid {
        return Err(ApiError::from(validation));
    }

    let state = state_lock.read().await.clone();
    let email = credentials.email.trim();

    info!(email = %safe_email_log(email), "🔐 Sign-in requested");
    let (access_token, user) = state
        .auth_backend
        .sign_in(email, &credentials.password)
        .await?;

    let session = AuthedUser {
        id: user.id.clone(),
        email: user.email.clone(),
        access_token: Some(access_token.clone()),
    };

    let spots_loaded = match state.spot_store.load(&session).await {
        Ok(spots) => Some(spots.len()),
        Err(e) => {
            warn!(user_id = %user.id, error = %e, "Could not load spots after sign-in");
            None
        }
    };

    state.events.publish(AppEvent::SessionChanged {
        user_id: user.id.clone(),
        signed_in: true,
    });

    info!(user_id = %user.id, spots_loaded = ?spots_loaded, "Session established");

    Ok(Json(SignInResponse {
        access_token,
        user,
        spots_loaded,
    }))
}

/// GET /api/auth/session
pub async fn session(authed: AuthedUser) -> Json<SessionUser> {
    Json(SessionUser {
        id: authed.id,
        email: authed.email,
    })
}

/// POST /api/auth/sign-out
///
/// Drops everything held in memory for the user.
pub async fn sign_out(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    state.spot_store.clear(&authed.id).await;
    state.drafts.remove(&authed.id).await;

    state.events.publish(AppEvent::SessionChanged {
        user_id: authed.id.clone(),
        signed_in: false,
    });

    info!(user_id = %authed.id, "Signed out");

    Ok(Json(MessageResponse {
        message: "Signed out".to_string(),
    }))
}
