//! Coordinate pair shared by the draft, the map and geocoding

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair. Both components are always finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Build a pair, rejecting NaN and infinities
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        if lat.is_finite() && lng.is_finite() {
            Some(Self { lat, lng })
        } else {
            None
        }
    }

    /// Build a pair from two optional components; both must be present
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng)) => Self::new(lat, lng),
            _ => None,
        }
    }

    /// Parse two form strings. Only succeeds when both parse to finite numbers.
    pub fn parse(lat: &str, lng: &str) -> Option<Self> {
        let lat = lat.trim().parse::<f64>().ok()?;
        let lng = lng.trim().parse::<f64>().ok()?;
        Self::new(lat, lng)
    }
}

/// Render a coordinate component the way the form displays it (5 decimals)
pub fn format_coordinate(value: f64) -> String {
    format!("{:.5}", value)
}
