// src/spots/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::common::LatLng;

// ============================================================================
// Spot Models
// ============================================================================

/// A logged building. Immutable once created.
///
/// Coordinates are held as one optional pair so a spot can never carry a
/// latitude without a longitude. On the wire (and in storage) they are flat
/// `lat`/`lng` fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SpotRow", into = "SpotRow")]
pub struct Spot {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub neighborhood: String,
    pub style: String,
    pub note: String,
    pub address: Option<String>,
    /// `data:<mime>;base64,...`
    pub photo: Option<String>,
    pub coords: Option<LatLng>,
    pub created_at: String,
}

/// Storage/wire shape of a spot, as found in SQLite and the REST table
#[derive(FromRow, Serialize, Deserialize, Debug, Clone, Default)]
pub struct SpotRow {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub neighborhood: Option<String>,
    pub style: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl From<SpotRow> for Spot {
    /// Rows with only one coordinate, or a non-finite one, lose both
    fn from(row: SpotRow) -> Self {
        Spot {
            coords: LatLng::from_parts(row.lat, row.lng),
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            neighborhood: row.neighborhood.unwrap_or_default(),
            style: row.style,
            note: row.note.unwrap_or_default(),
            address: row.address.filter(|a| !a.is_empty()),
            photo: row.photo.filter(|p| !p.is_empty()),
            created_at: row.created_at.unwrap_or_default(),
        }
    }
}

impl From<Spot> for SpotRow {
    fn from(spot: Spot) -> Self {
        SpotRow {
            lat: spot.coords.map(|c| c.lat),
            lng: spot.coords.map(|c| c.lng),
            id: spot.id,
            user_id: spot.user_id,
            name: spot.name,
            neighborhood: Some(spot.neighborhood),
            style: spot.style,
            note: Some(spot.note),
            address: spot.address,
            photo: spot.photo,
            created_at: Some(spot.created_at).filter(|c| !c.is_empty()),
        }
    }
}

impl Spot {
    pub fn lat(&self) -> Option<f64> {
        self.coords.map(|c| c.lat)
    }

    pub fn lng(&self) -> Option<f64> {
        self.coords.map(|c| c.lng)
    }
}

#[derive(Serialize, Debug)]
pub struct SpotListResponse {
    pub spots: Vec<Spot>,
    pub total: usize,
}
