// src/map/models.rs

use serde::{Deserialize, Serialize};

use crate::common::LatLng;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MarkerVariant {
    /// The signed-in user's own spots (default marker)
    Owned,
    /// Another collector's spots, drawn in a distinct color
    Foreign,
}

/// One spot on the map with the fields its popup shows
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub position: LatLng,
    pub name: String,
    pub style: String,
    pub variant: MarkerVariant,
    /// "by <owner>" line for foreign markers
    pub owner: Option<String>,
}

/// The not-yet-saved spot's pin
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PinMarker {
    pub position: LatLng,
    pub label: &'static str,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

/// Animated recenter, present only when the center moved
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FlyTo {
    pub center: LatLng,
    pub zoom: u8,
    pub duration_secs: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
    pub tile_layer: TileLayer,
    pub transition: Option<FlyTo>,
    pub pin: Option<PinMarker>,
    pub markers: Vec<Marker>,
    pub foreign_owner: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct MapQuery {
    /// Owner whose collection is overlaid
    pub show: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct StreetViewQuery {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Serialize, Debug)]
pub struct StreetViewResponse {
    pub embed_url: String,
}

#[derive(Serialize, Debug)]
pub struct CollectionSummary {
    pub owner: String,
    pub spots: usize,
}

#[derive(Serialize, Debug)]
pub struct CollectionListResponse {
    pub collections: Vec<CollectionSummary>,
}
