// src/map/routes.rs

use axum::{routing::get, Router};

use super::handlers;

/// Create the map router
pub fn map_routes() -> Router {
    Router::new()
        .route("/api/map", get(handlers::get_map))
        .route("/api/map/collections", get(handlers::list_collections))
        .route("/api/map/street-view", get(handlers::street_view))
}
