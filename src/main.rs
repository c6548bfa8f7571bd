// src/main.rs
use axum::{extract::Extension, middleware, routing::get, Json, Router};
use dotenv::dotenv;
use reqwest::Client;
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::PathBuf;
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// ============================================================================
// MODULE IMPORTS
// ============================================================================

mod auth;
mod collection;
mod common;
mod events;
mod logging_middleware;
mod map;
mod services;
mod spots;
mod stats;

#[cfg(test)]
mod test_support;

// ============================================================================
// COMMON IMPORTS
// ============================================================================

use common::config::{AppConfig, SpotBackendKind};
use common::dev_mode::{apply_cli_override, print_dev_mode_status, DevModeConfig};
use common::id_generator::SpotIdClock;
use common::AppState;
use events::EventBus;
use map::StaticForeignCollections;
use services::{BackendClient, NominatimClient};
use spots::{RemoteSpotRepository, SpotRepository, SpotStore, SqliteSpotRepository};
use stats::StaticLeaderboard;

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // ========================================================================
    // ENVIRONMENT CONFIGURATION
    // ========================================================================

    let config = AppConfig::from_env();

    // ========================================================================
    // DEV MODE CONFIGURATION
    // ========================================================================

    let dev_mode = apply_cli_override(DevModeConfig::from_env());
    print_dev_mode_status(&dev_mode);

    // ========================================================================
    // DATABASE SETUP
    // ========================================================================

    if let Some(path_part) = config.database_url.strip_prefix("sqlite://") {
        let path_without_params = path_part.split('?').next().unwrap_or("");
        if !path_without_params.is_empty() && !path_without_params.starts_with(':') {
            let db_path = PathBuf::from(path_without_params);
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }
    }

    // ========================================================================
    // SERVICE INITIALIZATION
    // ========================================================================

    let http_client = Client::builder().build()?;

    let backend = BackendClient::new(http_client.clone(), &config.backend);
    if config.backend.url.is_none() {
        warn!("BACKEND_URL not set - sign-in and remote spots are unavailable");
    }

    let geocoder = NominatimClient::new(http_client, config.geocoder.clone());
    info!(geocoder = %config.geocoder.base_url, "Geocoder initialized");

    let repository: Arc<dyn SpotRepository> = match config.spot_backend {
        SpotBackendKind::Sqlite => {
            let connect_options =
                SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
            let pool = SqlitePoolOptions::new()
                .connect_with(connect_options)
                .await?;

            // Run database migrations
            common::migrations::run_migrations(&pool).await?;
            info!(database = %config.database_url, "Spots stored in SQLite");
            Arc::new(SqliteSpotRepository::new(pool))
        }
        SpotBackendKind::Remote => {
            info!("Spots stored in the remote backend table");
            Arc::new(RemoteSpotRepository::new(backend.clone()))
        }
    };

    let events = EventBus::new();

    let spot_store = Arc::new(SpotStore::new(
        repository,
        config.persist_new_spots,
        events.clone(),
    ));
    info!(persist_new_spots = config.persist_new_spots, "SpotStore initialized");

    let drafts = Arc::new(collection::DraftBook::new(events.clone()));

    // ========================================================================
    // APPLICATION STATE
    // ========================================================================

    let port = config.port;
    let cors_origins = config.cors_origins.clone();

    let app_state = AppState {
        config: Arc::new(config),
        dev_mode,
        auth_backend: Arc::new(backend),
        geocoder: Arc::new(geocoder),
        spot_store,
        drafts,
        leaderboard: Arc::new(StaticLeaderboard::default()),
        foreign_collections: Arc::new(StaticForeignCollections::default()),
        id_clock: Arc::new(SpotIdClock::new()),
        events,
    };

    let shared = Arc::new(RwLock::new(app_state));

    // ========================================================================
    // ROUTER COMPOSITION
    // ========================================================================

    let app = Router::new()
        .route("/health", get(health))
        // ====================================================================
        // AUTHENTICATION ROUTES
        // ====================================================================
        .merge(auth::auth_routes())
        // ====================================================================
        // SPOT COLLECTION AND NEW-SPOT FORM
        // ====================================================================
        .merge(spots::spots_routes())
        .merge(collection::collection_routes())
        // ====================================================================
        // MAP, STATS AND LEADERBOARD
        // ====================================================================
        .merge(map::map_routes())
        .merge(stats::stats_routes())
        // ====================================================================
        // EVENT STREAM (WebSocket)
        // ====================================================================
        .merge(events::events_routes())
        // ====================================================================
        // MIDDLEWARE AND LAYERS
        // ====================================================================
        // Add request/response body logging in debug mode
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(Extension(shared.clone()))
        .layer({
            let origins: Vec<axum::http::HeaderValue> = cors_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::DELETE,
                    axum::http::Method::PATCH,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::AUTHORIZATION,
                ])
                .allow_credentials(true)
        })
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<axum::body::Body>| {
                logging_middleware::request_span(request)
            },
        ));

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
