// src/map/handlers.rs

use axum::extract::{Extension, Json, Query};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::models::{
    CollectionListResponse, CollectionSummary, MapQuery, MapView, StreetViewQuery,
    StreetViewResponse,
};
use super::view::{build_map_view, select_center, street_view_url};
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState, LatLng};

/// GET /api/map?show=<owner>
pub async fn get_map(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Query(query): Query<MapQuery>,
) -> Result<Json<MapView>, ApiError> {
    let state = state_lock.read().await.clone();

    let spots = state.spot_store.load(&authed).await?;
    let draft = state.drafts.snapshot(&authed.id).await;

    let foreign = match query.show.as_deref().map(str::trim) {
        Some(owner) if !owner.is_empty() => Some(
            state
                .foreign_collections
                .collection(owner)
                .await
                .ok_or_else(|| ApiError::NotFound(format!("No collection for '{}'", owner)))?,
        ),
        _ => None,
    };

    let center = select_center(&spots, &draft.draft, state.config.map.fallback_center);
    let moved = state.drafts.record_center(&authed.id, center).await;

    debug!(
        user_id = %authed.id,
        lat = center.lat,
        lng = center.lng,
        moved,
        "Map view computed"
    );

    Ok(Json(build_map_view(
        &spots,
        foreign.as_ref(),
        &draft,
        &state.config.map,
        center,
        moved,
    )))
}

/// GET /api/map/collections
pub async fn list_collections(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _authed: AuthedUser,
) -> Result<Json<CollectionListResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let collections = state
        .foreign_collections
        .collections()
        .await
        .into_iter()
        .map(|c| CollectionSummary {
            owner: c.owner,
            spots: c.spots.len(),
        })
        .collect();
    Ok(Json(CollectionListResponse { collections }))
}

/// GET /api/map/street-view?lat=&lng=
pub async fn street_view(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _authed: AuthedUser,
    Query(query): Query<StreetViewQuery>,
) -> Result<Json<StreetViewResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let at = LatLng::new(query.lat, query.lng)
        .ok_or_else(|| ApiError::BadRequest("Coordinates must be finite numbers".to_string()))?;
    let key = state.config.map.street_view_api_key.as_deref().ok_or_else(|| {
        ApiError::ServiceUnavailable("Street view is not configured".to_string())
    })?;

    Ok(Json(StreetViewResponse {
        embed_url: street_view_url(key, at),
    }))
}
