use axum::{routing::get, Router};

use super::handlers;

/// Creates the event-stream router
///
/// # Routes
/// - `GET /api/events` - websocket stream of the caller's state changes
pub fn events_routes() -> Router {
    Router::new().route("/api/events", get(handlers::events_handler))
}
