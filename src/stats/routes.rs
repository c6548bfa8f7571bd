// src/stats/routes.rs

use axum::{routing::get, Router};

use super::handlers;

/// Create the stats router
pub fn stats_routes() -> Router {
    Router::new()
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/leaderboard", get(handlers::get_leaderboard))
}
