// src/logging_middleware.rs
//! Middleware for logging request and response bodies in debug mode

use axum::body::to_bytes;
use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap, StatusCode, Uri},
    middleware::Next,
    response::Response,
};
use tracing::{debug, debug_span, enabled, Level, Span};

/// Logged bodies are cut to this many bytes (photo data URLs are large)
const MAX_LOGGED_BODY: usize = 2048;

/// Query parameters whose values never reach the logs
const REDACTED_PARAMS: &[&str] = &["token", "access_token"];

/// Path and query with credential values replaced
pub fn redacted_uri(uri: &Uri) -> String {
    let Some(query) = uri.query() else {
        return uri.path().to_string();
    };

    let query = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if REDACTED_PARAMS.contains(&key) => format!("{}=[REDACTED]", key),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", uri.path(), query)
}

/// `TraceLayer` span, same fields as the default one but with a redacted URI
pub fn request_span<B>(request: &axum::http::Request<B>) -> Span {
    debug_span!(
        "request",
        method = %request.method(),
        uri = %redacted_uri(request.uri()),
        version = ?request.version(),
    )
}

/// Multipart uploads and websocket upgrades are passed through untouched
fn is_passthrough(headers: &HeaderMap) -> bool {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    content_type.starts_with("multipart/") || headers.contains_key(header::UPGRADE)
}

fn render_body(bytes: &[u8]) -> Option<String> {
    let body_str = std::str::from_utf8(bytes).ok()?;
    let rendered = match serde_json::from_str::<serde_json::Value>(body_str) {
        Ok(json) => serde_json::to_string_pretty(&json).unwrap_or_else(|_| body_str.to_string()),
        Err(_) => body_str.to_string(),
    };

    if rendered.len() <= MAX_LOGGED_BODY {
        return Some(rendered);
    }
    let mut cut = MAX_LOGGED_BODY;
    while !rendered.is_char_boundary(cut) {
        cut -= 1;
    }
    Some(format!("{}… ({} bytes)", &rendered[..cut], rendered.len()))
}

/// Middleware to log request and response bodies in debug mode
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    if !enabled!(Level::DEBUG) || is_passthrough(request.headers()) {
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();

    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if let Some(body_str) = (!bytes.is_empty()).then(|| render_body(&bytes)).flatten() {
        debug!(
            method = %parts.method,
            uri = %redacted_uri(&parts.uri),
            request_body = %body_str,
            "📥 Request"
        );
    }

    let request = Request::from_parts(parts, Body::from(bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();

    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if let Some(body_str) = (!bytes.is_empty()).then(|| render_body(&bytes)).flatten() {
        debug!(
            status = %parts.status,
            response_body = %body_str,
            "📤 Response"
        );
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}
