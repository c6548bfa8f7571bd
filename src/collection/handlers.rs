// src/collection/handlers.rs

use axum::extract::{Extension, Json, Multipart};
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::models::{
    DraftEdit, DraftView, MapClickRequest, PlaceSuggestion, SearchRequest, SearchResponse,
    SelectResultRequest, StyleListResponse, SubmitResponse,
};
use super::photo::{PhotoError, PhotoUpload, MAX_PHOTO_BYTES};
use super::styles::style_options;
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState, LatLng};

/// GET /api/draft
pub async fn get_draft(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<DraftView>, ApiError> {
    let state = state_lock.read().await.clone();
    let draft = state.drafts.snapshot(&authed.id).await;
    Ok(Json(DraftView::from(&draft)))
}

/// PATCH /api/draft
pub async fn update_draft(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(edit): Json<DraftEdit>,
) -> Result<Json<DraftView>, ApiError> {
    let state = state_lock.read().await.clone();
    let view = state
        .drafts
        .try_update(&authed.id, |draft| {
            draft.apply_edit(edit).map(|_| DraftView::from(&*draft))
        })
        .await?;
    Ok(Json(view))
}

/// POST /api/draft/search
///
/// Only the latest issued search may fill the result list; a slower,
/// older response is returned to its caller but not applied.
pub async fn search(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let token = state
        .drafts
        .update(&authed.id, |draft| draft.begin_search(&request.query))
        .await;

    let Some(token) = token else {
        return Ok(Json(SearchResponse {
            query: request.query,
            results: Vec::new(),
            applied: true,
        }));
    };

    let places = state.geocoder.search(request.query.trim()).await;
    let results = PlaceSuggestion::list(&places);

    let applied = state
        .drafts
        .try_update(&authed.id, |draft| {
            draft
                .apply_search_results(token, places)
                .then_some(())
                .ok_or(())
        })
        .await
        .is_ok();

    debug!(user_id = %authed.id, results = results.len(), applied, "Search finished");

    Ok(Json(SearchResponse {
        query: request.query,
        results,
        applied,
    }))
}

/// POST /api/draft/search/select
pub async fn select_result(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<SelectResultRequest>,
) -> Result<Json<DraftView>, ApiError> {
    let state = state_lock.read().await.clone();
    let view = state
        .drafts
        .try_update(&authed.id, |draft| {
            draft
                .select_search_result(request.index)
                .map(|_| DraftView::from(&*draft))
        })
        .await?;
    Ok(Json(view))
}

/// POST /api/draft/map-click
///
/// The pin moves immediately. The address fields are filled by a background
/// reverse lookup, applied only if no newer click (or selection) happened.
pub async fn map_click(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<MapClickRequest>,
) -> Result<Json<DraftView>, ApiError> {
    let at = LatLng::new(request.lat, request.lng)
        .ok_or_else(|| ApiError::BadRequest("Coordinates must be finite numbers".to_string()))?;

    let state = state_lock.read().await.clone();

    let (token, view) = state
        .drafts
        .update(&authed.id, |draft| {
            let token = draft.place_pin(at);
            (token, DraftView::from(&*draft))
        })
        .await;

    let geocoder = state.geocoder.clone();
    let drafts = state.drafts.clone();
    let user_id = authed.id.clone();
    tokio::spawn(async move {
        let Some(place) = geocoder.reverse(at).await else {
            return;
        };
        let applied = drafts
            .try_update(&user_id, |draft| {
                draft
                    .apply_reverse_result(token, &place)
                    .then_some(())
                    .ok_or(())
            })
            .await
            .is_ok();
        debug!(user_id = %user_id, applied, "Reverse geocode finished");
    });

    Ok(Json(view))
}

/// POST /api/draft/photo (multipart, field `photo`)
pub async fn upload_photo(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    mut multipart: Multipart,
) -> Result<Json<DraftView>, ApiError> {
    let state = state_lock.read().await.clone();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("photo") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);

        // Abort as soon as the photo limit is passed
        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|_| ApiError::BadRequest("Failed to read file data".to_string()))?
        {
            bytes.extend_from_slice(&chunk);
            if bytes.len() as u64 > MAX_PHOTO_BYTES {
                let size = bytes.len() as u64;
                warn!(
                    user_id = %authed.id,
                    file_name = ?file_name,
                    size,
                    "Photo rejected while uploading"
                );
                return Err(ApiError::from(PhotoError::TooLarge { size }));
            }
        }

        let upload = PhotoUpload {
            file_name,
            reported_size: bytes.len() as u64,
            bytes,
        };

        let view = state
            .drafts
            .try_update(&authed.id, |draft| {
                draft
                    .attach_photo(&upload)
                    .map(|_| DraftView::from(&*draft))
            })
            .await
            .map_err(|e| {
                warn!(
                    user_id = %authed.id,
                    file_name = ?upload.file_name,
                    size = upload.reported_size,
                    error = %e,
                    "Photo rejected"
                );
                ApiError::from(e)
            })?;

        info!(user_id = %authed.id, size = upload.reported_size, "Photo attached to draft");
        return Ok(Json(view));
    }

    Err(ApiError::from(PhotoError::Missing))
}

/// DELETE /api/draft/photo
pub async fn clear_photo(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<DraftView>, ApiError> {
    let state = state_lock.read().await.clone();
    let view = state
        .drafts
        .update(&authed.id, |draft| {
            draft.clear_photo();
            DraftView::from(&*draft)
        })
        .await;
    Ok(Json(view))
}

/// POST /api/draft/submit
///
/// Turns the draft into a spot at the head of the collection and resets the
/// form. Rejected (and nothing appended) when name or style is missing.
pub async fn submit(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<SubmitResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    // Load first so a backend failure leaves the draft intact
    state.spot_store.load(&authed).await?;

    let id = state.id_clock.next_id();
    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    let spot = state
        .drafts
        .try_update(&authed.id, |draft| {
            draft.take_submission(id, &authed.id, created_at)
        })
        .await
        .map_err(ApiError::from)?;

    let total = state.spot_store.append(&authed, spot.clone()).await?;

    info!(user_id = %authed.id, spot_id = %spot.id, total, "Spot added");

    Ok(Json(SubmitResponse { spot, total }))
}

/// GET /api/styles
pub async fn list_styles() -> Json<StyleListResponse> {
    Json(StyleListResponse {
        styles: style_options(),
    })
}
