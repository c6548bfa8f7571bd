//! Map view model: center policy, markers, pin

use super::models::{FlyTo, MapView, Marker, MarkerVariant, PinMarker, TileLayer};
use super::sources::ForeignCollection;
use crate::collection::{DraftState, FormDraft};
use crate::common::config::MapConfig;
use crate::common::LatLng;
use crate::spots::Spot;

pub const DEFAULT_ZOOM: u8 = 13;
pub const FLY_DURATION_SECS: f64 = 1.5;

const STREET_VIEW_EMBED_URL: &str = "https://www.google.com/maps/embed/v1/streetview";

/// First spot with coordinates, else the draft's coordinates, else the
/// fallback
pub fn select_center(spots: &[Spot], draft: &FormDraft, fallback: LatLng) -> LatLng {
    spots
        .iter()
        .find_map(|s| s.coords)
        .or_else(|| draft.coordinates())
        .unwrap_or(fallback)
}

fn markers_for(spots: &[Spot], variant: MarkerVariant, owner: Option<&str>) -> Vec<Marker> {
    spots
        .iter()
        .filter_map(|spot| {
            spot.coords.map(|position| Marker {
                id: spot.id.clone(),
                position,
                name: spot.name.clone(),
                style: spot.style.clone(),
                variant,
                owner: owner.map(str::to_string),
            })
        })
        .collect()
}

pub fn build_map_view(
    spots: &[Spot],
    foreign: Option<&ForeignCollection>,
    draft: &DraftState,
    config: &MapConfig,
    center: LatLng,
    center_moved: bool,
) -> MapView {
    let mut markers = markers_for(spots, MarkerVariant::Owned, None);
    if let Some(collection) = foreign {
        markers.extend(markers_for(
            &collection.spots,
            MarkerVariant::Foreign,
            Some(&collection.owner),
        ));
    }

    MapView {
        center,
        zoom: DEFAULT_ZOOM,
        tile_layer: TileLayer {
            url_template: config.tile_url.clone(),
            attribution: config.attribution.clone(),
        },
        transition: center_moved.then_some(FlyTo {
            center,
            zoom: DEFAULT_ZOOM,
            duration_secs: FLY_DURATION_SECS,
        }),
        pin: draft.pin.map(|position| PinMarker {
            position,
            label: "new spot",
        }),
        markers,
        foreign_owner: foreign.map(|c| c.owner.clone()),
    }
}

/// Street-level imagery iframe URL for a coordinate
pub fn street_view_url(api_key: &str, at: LatLng) -> String {
    format!(
        "{}?key={}&location={},{}&heading=0&pitch=0&fov=90",
        STREET_VIEW_EMBED_URL,
        urlencoding::encode(api_key),
        at.lat,
        at.lng
    )
}
