//! Websocket stream of a user's state-change events

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, WebSocketUpgrade,
    },
    response::IntoResponse,
    Extension,
};
use futures_util::{SinkExt, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

use super::bus::AppEvent;
use crate::auth::extractors::resolve_session;
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState};

/// GET /api/events?token=<access token>
pub async fn events_handler(
    ws: WebSocketUpgrade,
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();

    let authed_user = if state.dev_mode.is_enabled() {
        state.dev_mode.create_dev_user()
    } else {
        let token = params
            .get("token")
            .ok_or_else(|| ApiError::Unauthorized("Missing authentication token".to_string()))?;
        resolve_session(&state, token).await?
    };

    info!(user_id = %authed_user.id, "Event stream authenticated");

    let rx = state.events.subscribe();
    Ok(ws.on_upgrade(move |socket| stream_events(socket, authed_user, rx)))
}

async fn stream_events(
    socket: WebSocket,
    authed_user: AuthedUser,
    mut rx: broadcast::Receiver<AppEvent>,
) {
    let user_id = authed_user.id;
    let (mut sender, mut receiver) = socket.split();

    let forward_user_id = user_id.clone();
    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) if event.user_id() == forward_user_id => {
                    let Ok(json) = serde_json::to_string(&event) else {
                        continue;
                    };
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(user_id = %forward_user_id, skipped, "Event stream lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let recv_user_id = user_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Close(_) => break,
                _ => debug!(user_id = %recv_user_id, "Ignoring inbound event-stream message"),
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
        }
        _ = (&mut recv_task) => {
            send_task.abort();
        }
    }

    info!(user_id = %user_id, "Event stream closed");
}
