// src/spots/store.rs
//! In-memory spot collections, one per signed-in user

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::models::Spot;
use super::repository::SpotRepository;
use crate::auth::AuthedUser;
use crate::common::ApiError;
use crate::events::{AppEvent, EventBus};

/// Holds each user's spots most-recent-first.
///
/// A collection is loaded from the repository once per session and then
/// only grows at the head. Nothing is ever updated or removed except by
/// `clear` on sign-out.
pub struct SpotStore {
    repository: Arc<dyn SpotRepository>,
    collections: RwLock<HashMap<String, Vec<Spot>>>,
    persist_new_spots: bool,
    events: EventBus,
}

impl SpotStore {
    pub fn new(
        repository: Arc<dyn SpotRepository>,
        persist_new_spots: bool,
        events: EventBus,
    ) -> Self {
        Self {
            repository,
            collections: RwLock::new(HashMap::new()),
            persist_new_spots,
            events,
        }
    }

    /// Load the user's persisted spots if they are not in memory yet, and
    /// return the collection. Repository errors leave the user unloaded.
    pub async fn load(&self, session: &AuthedUser) -> Result<Vec<Spot>, ApiError> {
        if let Some(spots) = self.collections.read().await.get(&session.id) {
            return Ok(spots.clone());
        }

        let fetched = self.repository.fetch_for_user(session).await?;

        let mut collections = self.collections.write().await;
        // Another request may have loaded (and appended to) it meanwhile
        let spots = collections
            .entry(session.id.clone())
            .or_insert_with(|| {
                info!(user_id = %session.id, count = fetched.len(), "Loaded spot collection");
                fetched
            });
        Ok(spots.clone())
    }

    /// Current collection, if loaded
    pub async fn list(&self, user_id: &str) -> Option<Vec<Spot>> {
        self.collections.read().await.get(user_id).cloned()
    }

    /// Insert a spot at the head of the user's collection and return the
    /// new collection size.
    ///
    /// When remote persistence of new spots is enabled the spot is also
    /// written to the repository; a failed write is logged and the local
    /// copy is kept.
    pub async fn append(&self, session: &AuthedUser, spot: Spot) -> Result<usize, ApiError> {
        self.load(session).await?;

        let total = {
            let mut collections = self.collections.write().await;
            let spots = collections.entry(session.id.clone()).or_default();
            spots.insert(0, spot.clone());
            spots.len()
        };

        if self.persist_new_spots {
            if let Err(e) = self.repository.insert(session, &spot).await {
                warn!(user_id = %session.id, spot_id = %spot.id, error = %e, "Failed to persist new spot");
            }
        }

        self.events.publish(AppEvent::SpotAdded {
            user_id: session.id.clone(),
            spot_id: spot.id,
            total,
        });

        Ok(total)
    }

    /// Forget the user's collection (sign-out)
    pub async fn clear(&self, user_id: &str) {
        self.collections.write().await.remove(user_id);
    }
}
