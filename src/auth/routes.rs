//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `GET /api/auth/form` - Credential form view for sign-in or sign-up
/// - `POST /api/auth/sign-up` - Register with email and password
/// - `POST /api/auth/sign-in` - Password sign-in, loads the user's spots
/// - `GET /api/auth/session` - Current session identity
/// - `POST /api/auth/sign-out` - Clear the user's in-memory state
pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/auth/form", get(handlers::auth_form))
        .route("/api/auth/sign-up", post(handlers::sign_up))
        .route("/api/auth/sign-in", post(handlers::sign_in))
        .route("/api/auth/session", get(handlers::session))
        .route("/api/auth/sign-out", post(handlers::sign_out))
}
