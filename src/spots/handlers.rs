// src/spots/handlers.rs

use axum::extract::{Extension, Json};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::models::SpotListResponse;
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState};

/// GET /api/spots - the caller's collection, most recent first
pub async fn list_spots(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<SpotListResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let spots = state.spot_store.load(&authed).await?;
    let total = spots.len();

    Ok(Json(SpotListResponse { spots, total }))
}
