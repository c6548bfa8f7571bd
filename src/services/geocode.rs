// src/services/geocode.rs
//! Nominatim-compatible forward and reverse geocoding
//!
//! Lookups never fail from the caller's point of view: any network or
//! upstream error is logged and turns into an empty result.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::common::config::GeocoderConfig;
use crate::common::LatLng;

/// Maximum number of forward-search results shown to the user
pub const SEARCH_RESULT_LIMIT: usize = 5;

/// Queries shorter than this (after trimming) are not sent upstream
pub const MIN_QUERY_CHARS: usize = 3;

const LABEL_KEYS: &[&str] = &[
    "building",
    "house_name",
    "amenity",
    "tourism",
    "historic",
    "shop",
    "road",
];

const NEIGHBORHOOD_KEYS: &[&str] = &[
    "neighbourhood",
    "suburb",
    "quarter",
    "city_district",
    "district",
    "borough",
    "village",
    "town",
    "city",
];

/// One place as returned by `/search` (array items) or `/reverse`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: String,
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub address: HashMap<String, String>,
}

impl Place {
    fn address_field(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|key| self.address.get(*key))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Primary label: the place name, then the address priority list, then
    /// the first segment of the display name
    pub fn primary_label(&self) -> String {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .or_else(|| self.address_field(LABEL_KEYS))
            .unwrap_or_else(|| {
                self.display_name
                    .split(',')
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string()
            })
    }

    pub fn neighborhood(&self) -> String {
        self.address_field(NEIGHBORHOOD_KEYS).unwrap_or_default()
    }

    pub fn full_address(&self) -> String {
        self.display_name.trim().to_string()
    }

    pub fn coordinates(&self) -> Option<LatLng> {
        LatLng::parse(&self.lat, &self.lon)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Geocoder returned status {0}")]
    Status(u16),
    #[error("Geocoder error: {0}")]
    Upstream(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Forward search, at most `SEARCH_RESULT_LIMIT` results
    async fn search(&self, query: &str) -> Vec<Place>;

    /// Reverse lookup of a coordinate
    async fn reverse(&self, at: LatLng) -> Option<Place>;
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    config: GeocoderConfig,
}

impl NominatimClient {
    pub fn new(client: Client, config: GeocoderConfig) -> Self {
        Self { client, config }
    }

    /// The `q` parameter: user text biased towards the configured city/region
    pub fn search_query(&self, query: &str) -> String {
        format!("{},{},{}", query.trim(), self.config.city, self.config.region)
    }

    async fn try_search(&self, query: &str) -> Result<Vec<Place>, GeocodeError> {
        let q = self.search_query(query);
        let limit = SEARCH_RESULT_LIMIT.to_string();
        let resp = self
            .client
            .get(format!("{}/search", self.config.base_url))
            .header(reqwest::header::USER_AGENT, &self.config.user_agent)
            .query(&[
                ("q", q.as_str()),
                ("format", "json"),
                ("addressdetails", "1"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(GeocodeError::Status(resp.status().as_u16()));
        }

        let mut places = resp
            .json::<Vec<Place>>()
            .await
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;
        places.truncate(SEARCH_RESULT_LIMIT);
        Ok(places)
    }

    async fn try_reverse(&self, at: LatLng) -> Result<Place, GeocodeError> {
        let lat = at.lat.to_string();
        let lon = at.lng.to_string();
        let resp = self
            .client
            .get(format!("{}/reverse", self.config.base_url))
            .header(reqwest::header::USER_AGENT, &self.config.user_agent)
            .query(&[
                ("format", "json"),
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("addressdetails", "1"),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(GeocodeError::Status(resp.status().as_u16()));
        }

        let body = resp
            .json::<serde_json::Value>()
            .await
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;
        parse_reverse_body(body)
    }
}

/// Nominatim answers a failed reverse lookup with 200 and `{"error": ...}`
pub fn parse_reverse_body(body: serde_json::Value) -> Result<Place, GeocodeError> {
    if let Some(message) = body.get("error").and_then(|e| e.as_str()) {
        return Err(GeocodeError::Upstream(message.to_string()));
    }
    serde_json::from_value::<Place>(body).map_err(|e| GeocodeError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn search(&self, query: &str) -> Vec<Place> {
        match self.try_search(query).await {
            Ok(places) => {
                debug!(results = places.len(), "Forward geocode completed");
                places
            }
            Err(e) => {
                warn!(error = %e, "Forward geocode failed");
                Vec::new()
            }
        }
    }

    async fn reverse(&self, at: LatLng) -> Option<Place> {
        match self.try_reverse(at).await {
            Ok(place) => Some(place),
            Err(e) => {
                warn!(error = %e, lat = at.lat, lng = at.lng, "Reverse geocode failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn place_from(value: serde_json::Value) -> Place {
        serde_json::from_value(value).expect("place")
    }

    #[test]
    fn test_primary_label_prefers_name() {
        let place = place_from(json!({
            "name": "Big Ben",
            "display_name": "Big Ben, Bridge Street, Westminster, London, SW1A 0AA, United Kingdom",
            "lat": "51.5008413",
            "lon": "-0.1246254",
            "address": {"tourism": "Big Ben", "road": "Bridge Street", "quarter": "Westminster", "city": "London"}
        }));

        assert_eq!(place.primary_label(), "Big Ben");
        assert_eq!(place.neighborhood(), "Westminster");
        assert!(place.full_address().starts_with("Big Ben, Bridge Street"));
    }

    #[test]
    fn test_label_falls_back_through_address_priority() {
        let place = place_from(json!({
            "name": "",
            "display_name": "12, Gower Street, Bloomsbury, London",
            "lat": "51.52",
            "lon": "-0.13",
            "address": {"road": "Gower Street", "amenity": "Senate House", "suburb": "Bloomsbury"}
        }));
        assert_eq!(place.primary_label(), "Senate House");
        assert_eq!(place.neighborhood(), "Bloomsbury");

        let bare = place_from(json!({
            "display_name": "Somewhere, Far Away",
            "lat": "1",
            "lon": "2"
        }));
        assert_eq!(bare.primary_label(), "Somewhere");
        assert_eq!(bare.neighborhood(), "");
    }

    #[test]
    fn test_reverse_error_body_is_an_error() {
        let err = parse_reverse_body(json!({"error": "Unable to geocode"})).unwrap_err();
        assert!(matches!(err, GeocodeError::Upstream(_)));

        let place = parse_reverse_body(json!({
            "display_name": "Tate Modern, Bankside, London",
            "lat": "51.5076",
            "lon": "-0.0994",
            "address": {"building": "Tate Modern", "suburb": "Bankside"}
        }))
        .expect("place");
        assert_eq!(place.primary_label(), "Tate Modern");
        assert_eq!(
            place.coordinates(),
            Some(LatLng { lat: 51.5076, lng: -0.0994 })
        );
    }

    #[test]
    fn test_search_query_appends_city_and_region() {
        let client = NominatimClient::new(
            Client::new(),
            GeocoderConfig {
                base_url: "http://localhost".to_string(),
                user_agent: "archy-test".to_string(),
                city: "London".to_string(),
                region: "UK".to_string(),
            },
        );
        assert_eq!(client.search_query("  barbican "), "barbican,London,UK");
    }

    #[tokio::test]
    async fn test_unreachable_geocoder_yields_empty_results() {
        let client = NominatimClient::new(
            Client::new(),
            GeocoderConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                user_agent: "archy-test".to_string(),
                city: "London".to_string(),
                region: "UK".to_string(),
            },
        );
        assert!(client.search("barbican").await.is_empty());
        assert!(client
            .reverse(LatLng { lat: 51.5, lng: -0.1 })
            .await
            .is_none());
    }
}
