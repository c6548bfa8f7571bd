//! Broadcast of application-state changes to subscribers

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// A change to some user's slice of application state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    SessionChanged { user_id: String, signed_in: bool },
    SpotAdded { user_id: String, spot_id: String, total: usize },
    DraftChanged { user_id: String },
}

impl AppEvent {
    pub fn user_id(&self) -> &str {
        match self {
            AppEvent::SessionChanged { user_id, .. }
            | AppEvent::SpotAdded { user_id, .. }
            | AppEvent::DraftChanged { user_id } => user_id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publish an event. Having no subscribers is not an error.
    pub fn publish(&self, event: AppEvent) {
        match self.tx.send(event) {
            Ok(receivers) => debug!(receivers, "Published app event"),
            Err(broadcast::error::SendError(event)) => {
                debug!(user_id = %event.user_id(), "No subscribers for app event")
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_published_events() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.publish(AppEvent::DraftChanged {
            user_id: "u1".to_string(),
        });

        let event = rx.recv().await.expect("event");
        assert_eq!(event.user_id(), "u1");
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(AppEvent::SessionChanged {
            user_id: "u1".to_string(),
            signed_in: false,
        });
    }

    #[test]
    fn test_event_wire_format() {
        let event = AppEvent::SpotAdded {
            user_id: "u1".to_string(),
            spot_id: "1700000000000".to_string(),
            total: 3,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "spot_added");
        assert_eq!(json["total"], 3);
    }
}
