// src/stats/handlers.rs

use axum::extract::{Extension, Json};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::engine::{build_leaderboard, compute_stats};
use super::models::{LeaderboardEntry, LeaderboardResponse, StatsSnapshot};
use crate::auth::AuthedUser;
use crate::common::helpers::display_name_from_email;
use crate::common::{ApiError, AppState};

/// GET /api/stats
pub async fn get_stats(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<StatsSnapshot>, ApiError> {
    let state = state_lock.read().await.clone();
    let spots = state.spot_store.load(&authed).await?;
    Ok(Json(compute_stats(&spots)))
}

/// GET /api/leaderboard
pub async fn get_leaderboard(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let spots = state.spot_store.load(&authed).await?;

    let current = LeaderboardEntry {
        name: display_name_from_email(&authed.email),
        score: compute_stats(&spots).score,
        is_current_user: true,
    };
    let others = state.leaderboard.entries().await;

    Ok(Json(LeaderboardResponse {
        entries: build_leaderboard(current, others),
    }))
}
