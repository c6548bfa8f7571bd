// src/common/config.rs
//! Runtime configuration loaded from the environment
//!
//! Every secret (backend anon key, JWT secret, street-view key) comes from
//! here. Nothing sensitive is compiled into the binary.

use std::env;
use std::str::FromStr;

use super::geo::LatLng;

/// Where spots are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotBackendKind {
    /// Local SQLite database
    Sqlite,
    /// Remote REST table on the auth/persistence backend
    Remote,
}

impl FromStr for SpotBackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" | "local" => Ok(SpotBackendKind::Sqlite),
            "remote" | "supabase" => Ok(SpotBackendKind::Remote),
            other => Err(format!("unknown spot backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Appended to every forward search to bias results
    pub city: String,
    pub region: String,
}

#[derive(Debug, Clone)]
pub struct MapConfig {
    pub tile_url: String,
    pub attribution: String,
    pub fallback_center: LatLng,
    pub street_view_api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub spot_backend: SpotBackendKind,
    pub backend: BackendConfig,
    pub auth_jwt_secret: Option<String>,
    pub persist_new_spots: bool,
    pub geocoder: GeocoderConfig,
    pub map: MapConfig,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://archy.db".to_string());

        let spot_backend = env::var("SPOT_BACKEND")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(SpotBackendKind::Sqlite);

        let backend = BackendConfig {
            url: non_empty_var("BACKEND_URL").map(|u| u.trim_end_matches('/').to_string()),
            anon_key: non_empty_var("BACKEND_ANON_KEY"),
        };

        let fallback_center = LatLng::new(
            parse_var("MAP_FALLBACK_LAT", 51.5074),
            parse_var("MAP_FALLBACK_LNG", -0.1278),
        )
        .unwrap_or(LatLng {
            lat: 51.5074,
            lng: -0.1278,
        });

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        Self {
            port,
            database_url,
            spot_backend,
            backend,
            auth_jwt_secret: non_empty_var("AUTH_JWT_SECRET"),
            persist_new_spots: bool_var("PERSIST_NEW_SPOTS", true),
            geocoder: GeocoderConfig {
                base_url: env::var("GEOCODER_URL")
                    .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string())
                    .trim_end_matches('/')
                    .to_string(),
                user_agent: env::var("GEOCODER_USER_AGENT")
                    .unwrap_or_else(|_| format!("archy/{}", env!("CARGO_PKG_VERSION"))),
                city: env::var("GEOCODER_CITY").unwrap_or_else(|_| "London".to_string()),
                region: env::var("GEOCODER_REGION").unwrap_or_else(|_| "UK".to_string()),
            },
            map: MapConfig {
                tile_url: env::var("MAP_TILE_URL").unwrap_or_else(|_| {
                    "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
                }),
                attribution: env::var("MAP_ATTRIBUTION")
                    .unwrap_or_else(|_| "© OpenStreetMap contributors".to_string()),
                fallback_center,
                street_view_api_key: non_empty_var("STREET_VIEW_API_KEY"),
            },
            cors_origins,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn bool_var(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) => matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spot_backend_parsing() {
        assert_eq!("sqlite".parse::<SpotBackendKind>(), Ok(SpotBackendKind::Sqlite));
        assert_eq!("Remote".parse::<SpotBackendKind>(), Ok(SpotBackendKind::Remote));
        assert_eq!(" supabase ".parse::<SpotBackendKind>(), Ok(SpotBackendKind::Remote));
        assert!("postgres".parse::<SpotBackendKind>().is_err());
    }

    #[test]
    fn test_parse_var_falls_back_on_garbage() {
        env::set_var("ARCHY_TEST_PARSE_VAR", "not-a-number");
        assert_eq!(parse_var("ARCHY_TEST_PARSE_VAR", 7.5), 7.5);
        env::set_var("ARCHY_TEST_PARSE_VAR", "12.25");
        assert_eq!(parse_var("ARCHY_TEST_PARSE_VAR", 7.5), 12.25);
        env::remove_var("ARCHY_TEST_PARSE_VAR");
    }

    #[test]
    fn test_bool_var_default_and_values() {
        env::remove_var("ARCHY_TEST_BOOL_VAR");
        assert!(bool_var("ARCHY_TEST_BOOL_VAR", true));
        env::set_var("ARCHY_TEST_BOOL_VAR", "false");
        assert!(!bool_var("ARCHY_TEST_BOOL_VAR", true));
        env::set_var("ARCHY_TEST_BOOL_VAR", "TRUE");
        assert!(bool_var("ARCHY_TEST_BOOL_VAR", false));
        env::remove_var("ARCHY_TEST_BOOL_VAR");
    }
}
