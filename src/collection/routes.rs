// src/collection/routes.rs

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use super::handlers;

/// Body limit for the photo route. The 2 MiB photo limit itself is checked
/// by the handler.
const PHOTO_BODY_LIMIT: usize = 8 * 1024 * 1024;

/// Create the new-spot form router
pub fn collection_routes() -> Router {
    Router::new()
        .route(
            "/api/draft",
            get(handlers::get_draft).patch(handlers::update_draft),
        )
        .route("/api/draft/search", post(handlers::search))
        .route("/api/draft/search/select", post(handlers::select_result))
        .route("/api/draft/map-click", post(handlers::map_click))
        .route(
            "/api/draft/photo",
            post(handlers::upload_photo)
                .delete(handlers::clear_photo)
                .layer(DefaultBodyLimit::max(PHOTO_BODY_LIMIT)),
        )
        .route("/api/draft/submit", post(handlers::submit))
        .route("/api/styles", get(handlers::list_styles))
}
