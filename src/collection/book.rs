//! Per-user draft state with single-writer updates

use std::collections::HashMap;
use tokio::sync::RwLock;

use super::draft::DraftState;
use crate::common::LatLng;
use crate::events::{AppEvent, EventBus};

pub struct DraftBook {
    drafts: RwLock<HashMap<String, DraftState>>,
    events: EventBus,
}

impl DraftBook {
    pub fn new(events: EventBus) -> Self {
        Self {
            drafts: RwLock::new(HashMap::new()),
            events,
        }
    }

    /// Copy of the user's draft state (empty if the user has none yet)
    pub async fn snapshot(&self, user_id: &str) -> DraftState {
        self.drafts
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Run one mutation under the write lock, then notify subscribers
    pub async fn update<R, F>(&self, user_id: &str, f: F) -> R
    where
        F: FnOnce(&mut DraftState) -> R,
    {
        let result = {
            let mut drafts = self.drafts.write().await;
            f(drafts.entry(user_id.to_string()).or_default())
        };

        self.events.publish(AppEvent::DraftChanged {
            user_id: user_id.to_string(),
        });

        result
    }

    /// Like `update` for mutations that can be rejected. Subscribers are
    /// only notified when the mutation succeeded.
    pub async fn try_update<R, E, F>(&self, user_id: &str, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut DraftState) -> Result<R, E>,
    {
        let result = {
            let mut drafts = self.drafts.write().await;
            f(drafts.entry(user_id.to_string()).or_default())
        };

        if result.is_ok() {
            self.events.publish(AppEvent::DraftChanged {
                user_id: user_id.to_string(),
            });
        }

        result
    }

    /// Record the map center shown to the user; returns whether it moved.
    /// Not a draft change, so nothing is published.
    pub async fn record_center(&self, user_id: &str, center: LatLng) -> bool {
        let mut drafts = self.drafts.write().await;
        drafts
            .entry(user_id.to_string())
            .or_default()
            .swap_center(center)
    }

    pub async fn remove(&self, user_id: &str) {
        self.drafts.write().await.remove(user_id);
    }
}
