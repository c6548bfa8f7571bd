// src/spots/routes.rs

use axum::{routing::get, Router};

use super::handlers;

/// Create the spots router
pub fn spots_routes() -> Router {
    Router::new().route("/api/spots", get(handlers::list_spots))
}
