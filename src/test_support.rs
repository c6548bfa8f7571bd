//! In-process fakes and an `AppState` builder for unit tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

use crate::auth::{AuthBackend, AuthedUser, SessionUser};
use crate::collection::DraftBook;
use crate::common::config::{
    AppConfig, BackendConfig, GeocoderConfig, MapConfig, SpotBackendKind,
};
use crate::common::dev_mode::DevModeConfig;
use crate::common::id_generator::SpotIdClock;
use crate::common::{ApiError, AppState, LatLng};
use crate::events::EventBus;
use crate::map::StaticForeignCollections;
use crate::services::{Geocoder, Place};
use crate::spots::{Spot, SpotRepository, SpotStore};
use crate::stats::StaticLeaderboard;

pub fn test_config() -> AppConfig {
    AppConfig {
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        spot_backend: SpotBackendKind::Sqlite,
        backend: BackendConfig {
            url: None,
            anon_key: None,
        },
        auth_jwt_secret: None,
        persist_new_spots: true,
        geocoder: GeocoderConfig {
            base_url: "http://geocoder.invalid".to_string(),
            user_agent: "archy-tests".to_string(),
            city: "London".to_string(),
            region: "UK".to_string(),
        },
        map: MapConfig {
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
            fallback_center: LatLng {
                lat: 51.5074,
                lng: -0.1278,
            },
            street_view_api_key: None,
        },
        cors_origins: Vec::new(),
    }
}

pub fn user(id: &str, email: &str) -> AuthedUser {
    AuthedUser {
        id: id.to_string(),
        email: email.to_string(),
        access_token: Some(format!("token-{}", id)),
    }
}

pub fn spot(id: &str, user_id: &str, name: &str, style: &str, coords: Option<LatLng>) -> Spot {
    Spot {
        id: id.to_string(),
        user_id: user_id.to_string(),
        name: name.to_string(),
        neighborhood: String::new(),
        style: style.to_string(),
        note: String::new(),
        address: None,
        photo: None,
        coords,
        created_at: "2024-05-01T12:00:00.000Z".to_string(),
    }
}

pub fn place(name: &str, lat: &str, lon: &str, suburb: &str) -> Place {
    let mut address = HashMap::new();
    if !suburb.is_empty() {
        address.insert("suburb".to_string(), suburb.to_string());
    }
    Place {
        name: Some(name.to_string()),
        display_name: format!("{}, {}, London, UK", name, suburb),
        lat: lat.to_string(),
        lon: lon.to_string(),
        address,
    }
}

// ============================================================================
// Auth
// ============================================================================

/// Accounts keyed by email; tokens are `token-<id>`
#[derive(Default)]
pub struct FakeAuthBackend {
    accounts: Mutex<HashMap<String, (String, SessionUser)>>,
}

impl FakeAuthBackend {
    pub fn with_account(self, id: &str, email: &str, password: &str) -> Self {
        self.accounts.lock().unwrap().insert(
            email.to_string(),
            (
                password.to_string(),
                SessionUser {
                    id: id.to_string(),
                    email: email.to_string(),
                },
            ),
        );
        self
    }
}

#[async_trait]
impl AuthBackend for FakeAuthBackend {
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), ApiError> {
        if password.len() < 6 {
            return Err(ApiError::AuthFailed(
                "Password should be at least 6 characters.".to_string(),
            ));
        }
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Err(ApiError::AuthFailed("User already registered".to_string()));
        }
        let id = format!("user-{}", accounts.len() + 1);
        accounts.insert(
            email.to_string(),
            (
                password.to_string(),
                SessionUser {
                    id,
                    email: email.to_string(),
                },
            ),
        );
        Ok(())
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(String, SessionUser), ApiError> {
        match self.accounts.lock().unwrap().get(email) {
            Some((stored, user)) if stored == password => {
                Ok((format!("token-{}", user.id), user.clone()))
            }
            _ => Err(ApiError::AuthFailed(
                "Invalid login credentials".to_string(),
            )),
        }
    }

    async fn get_user(&self, access_token: &str) -> Result<SessionUser, ApiError> {
        let id = access_token.strip_prefix("token-").unwrap_or_default();
        self.accounts
            .lock()
            .unwrap()
            .values()
            .map(|(_, user)| user)
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("invalid JWT".to_string()))
    }
}

// ============================================================================
// Spots
// ============================================================================

#[derive(Default)]
pub struct MemorySpotRepository {
    pub spots: Mutex<Vec<Spot>>,
    pub fail_fetch: bool,
    pub fail_insert: bool,
}

impl MemorySpotRepository {
    pub fn with_spots(spots: Vec<Spot>) -> Self {
        Self {
            spots: Mutex::new(spots),
            ..Default::default()
        }
    }

    pub fn stored(&self) -> Vec<Spot> {
        self.spots.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpotRepository for MemorySpotRepository {
    async fn fetch_for_user(&self, session: &AuthedUser) -> Result<Vec<Spot>, ApiError> {
        if self.fail_fetch {
            return Err(ApiError::BackendError("relation \"spots\" does not exist".to_string()));
        }
        Ok(self
            .spots
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == session.id)
            .cloned()
            .collect())
    }

    async fn insert(&self, _session: &AuthedUser, spot: &Spot) -> Result<(), ApiError> {
        if self.fail_insert {
            return Err(ApiError::BackendError("insert rejected".to_string()));
        }
        self.spots.lock().unwrap().insert(0, spot.clone());
        Ok(())
    }
}

// ============================================================================
// Geocoding
// ============================================================================

#[derive(Default)]
pub struct FakeGeocoder {
    pub results: Vec<Place>,
    pub reverse_place: Option<Place>,
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn search(&self, _query: &str) -> Vec<Place> {
        self.results.clone()
    }

    async fn reverse(&self, _at: LatLng) -> Option<Place> {
        self.reverse_place.clone()
    }
}

// ============================================================================
// State
// ============================================================================

pub struct TestStateBuilder {
    config: AppConfig,
    dev_mode: DevModeConfig,
    auth_backend: Arc<dyn AuthBackend>,
    geocoder: Arc<dyn Geocoder>,
    repository: Arc<dyn SpotRepository>,
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self {
            config: test_config(),
            dev_mode: DevModeConfig {
                enabled: false,
                user_id: "dev-user".to_string(),
                user_email: "dev@archy.local".to_string(),
            },
            auth_backend: Arc::new(FakeAuthBackend::default()),
            geocoder: Arc::new(FakeGeocoder::default()),
            repository: Arc::new(MemorySpotRepository::default()),
        }
    }

    pub fn config(mut self, f: impl FnOnce(&mut AppConfig)) -> Self {
        f(&mut self.config);
        self
    }

    /// Requests authenticate as `dev-user` without a token
    pub fn dev_mode(mut self, enabled: bool) -> Self {
        self.dev_mode.enabled = enabled;
        self
    }

    pub fn auth_backend(mut self, backend: Arc<dyn AuthBackend>) -> Self {
        self.auth_backend = backend;
        self
    }

    pub fn geocoder(mut self, geocoder: Arc<dyn Geocoder>) -> Self {
        self.geocoder = geocoder;
        self
    }

    pub fn repository(mut self, repository: Arc<dyn SpotRepository>) -> Self {
        self.repository = repository;
        self
    }

    pub fn build(self) -> AppState {
        let events = EventBus::default();
        AppState {
            spot_store: Arc::new(SpotStore::new(
                self.repository,
                self.config.persist_new_spots,
                events.clone(),
            )),
            drafts: Arc::new(DraftBook::new(events.clone())),
            config: Arc::new(self.config),
            dev_mode: self.dev_mode,
            auth_backend: self.auth_backend,
            geocoder: self.geocoder,
            leaderboard: Arc::new(StaticLeaderboard::default()),
            foreign_collections: Arc::new(StaticForeignCollections::default()),
            id_clock: Arc::new(SpotIdClock::default()),
            events,
        }
    }

    pub fn build_locked(self) -> Arc<RwLock<AppState>> {
        Arc::new(RwLock::new(self.build()))
    }
}
