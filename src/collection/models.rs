// src/collection/models.rs

use serde::{Deserialize, Serialize};

use super::draft::{DraftState, FormDraft};
use super::styles::StyleOption;
use crate::common::LatLng;
use crate::services::Place;
use crate::spots::Spot;

// ============================================================================
// Requests
// ============================================================================

/// PATCH /api/draft - any subset of the form fields
#[derive(Deserialize, Debug, Default)]
pub struct DraftEdit {
    pub name: Option<String>,
    pub neighborhood: Option<String>,
    /// Preset label, `custom`, or empty to unset
    pub style: Option<String>,
    pub custom_style: Option<String>,
    pub note: Option<String>,
    pub address: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Deserialize, Debug)]
pub struct SelectResultRequest {
    pub index: usize,
}

#[derive(Deserialize, Debug)]
pub struct MapClickRequest {
    pub lat: f64,
    pub lng: f64,
}

// ============================================================================
// Responses
// ============================================================================

/// A search hit as listed under the search box
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PlaceSuggestion {
    pub index: usize,
    pub label: String,
    pub full_address: String,
    pub lat: String,
    pub lon: String,
}

impl PlaceSuggestion {
    pub fn list(places: &[Place]) -> Vec<PlaceSuggestion> {
        places
            .iter()
            .enumerate()
            .map(|(index, place)| PlaceSuggestion {
                index,
                label: place.primary_label(),
                full_address: place.full_address(),
                lat: place.lat.clone(),
                lon: place.lon.clone(),
            })
            .collect()
    }
}

#[derive(Serialize, Debug)]
pub struct DraftView {
    pub draft: FormDraft,
    pub effective_style: String,
    pub can_submit: bool,
    pub search_query: String,
    pub search_results: Vec<PlaceSuggestion>,
    pub pin: Option<LatLng>,
}

impl From<&DraftState> for DraftView {
    fn from(state: &DraftState) -> Self {
        DraftView {
            draft: state.draft.clone(),
            effective_style: state.draft.effective_style(),
            can_submit: state.draft.can_submit(),
            search_query: state.search_query.clone(),
            search_results: PlaceSuggestion::list(&state.search_results),
            pin: state.pin,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<PlaceSuggestion>,
    /// False when a newer search superseded this one before it finished
    pub applied: bool,
}

#[derive(Serialize, Debug)]
pub struct SubmitResponse {
    pub spot: Spot,
    pub total: usize,
}

#[derive(Serialize, Debug)]
pub struct StyleListResponse {
    pub styles: Vec<StyleOption>,
}
