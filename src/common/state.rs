// Application state shared across all modules

use std::sync::Arc;

use crate::auth::AuthBackend;
use crate::collection::DraftBook;
use crate::common::config::AppConfig;
use crate::common::dev_mode::DevModeConfig;
use crate::common::id_generator::SpotIdClock;
use crate::events::EventBus;
use crate::map::ForeignCollectionSource;
use crate::services::Geocoder;
use crate::spots::SpotStore;
use crate::stats::LeaderboardSource;

/// The single application-state container.
///
/// The mutable parts (`spot_store`, `drafts`) are only changed through their
/// own update functions, each of which publishes on `events`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub dev_mode: DevModeConfig,
    pub auth_backend: Arc<dyn AuthBackend>,
    pub geocoder: Arc<dyn Geocoder>,
    pub spot_store: Arc<SpotStore>,
    pub drafts: Arc<DraftBook>,
    pub leaderboard: Arc<dyn LeaderboardSource>,
    pub foreign_collections: Arc<dyn ForeignCollectionSource>,
    pub id_clock: Arc<SpotIdClock>,
    pub events: EventBus,
}
