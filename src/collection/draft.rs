// src/collection/draft.rs
//! The new-spot form and the UI state around it (search box, pin)

use serde::Serialize;
use tracing::debug;

use super::generation::{GenerationToken, RequestGeneration};
use super::models::DraftEdit;
use super::photo::{encode_photo, PhotoError, PhotoUpload};
use super::styles::StyleChoice;
use super::validators::DraftValidator;
use crate::common::geo::format_coordinate;
use crate::common::{ApiError, LatLng, ValidationResult, Validator};
use crate::services::geocode::{Place, MIN_QUERY_CHARS};
use crate::spots::Spot;

/// Form fields exactly as typed. Coordinates stay strings until submit.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormDraft {
    pub name: String,
    pub neighborhood: String,
    pub style: StyleChoice,
    pub custom_style: String,
    pub note: String,
    pub address: String,
    pub lat: String,
    pub lng: String,
    pub photo: Option<String>,
}

impl FormDraft {
    /// The style a submitted spot would get: the preset label or the trimmed
    /// custom text
    pub fn effective_style(&self) -> String {
        match self.style {
            StyleChoice::Unset => String::new(),
            StyleChoice::Preset(style) => style.label().to_string(),
            StyleChoice::Custom => self.custom_style.trim().to_string(),
        }
    }

    /// Same rule the submit path enforces
    pub fn can_submit(&self) -> bool {
        DraftValidator.validate(self).is_valid
    }

    /// Coordinates only when both strings parse to finite numbers
    pub fn coordinates(&self) -> Option<LatLng> {
        LatLng::parse(&self.lat, &self.lng)
    }

    fn set_coordinates(&mut self, at: LatLng) {
        self.lat = format_coordinate(at.lat);
        self.lng = format_coordinate(at.lng);
    }

    pub fn to_spot(
        &self,
        id: String,
        user_id: &str,
        created_at: String,
    ) -> Result<Spot, ValidationResult> {
        let validation = DraftValidator.validate(self);
        if !validation.is_valid {
            return Err(validation);
        }

        let address = self.address.trim();
        Ok(Spot {
            id,
            user_id: user_id.to_string(),
            name: self.name.trim().to_string(),
            neighborhood: self.neighborhood.trim().to_string(),
            style: self.effective_style(),
            note: self.note.trim().to_string(),
            address: (!address.is_empty()).then(|| address.to_string()),
            photo: self.photo.clone(),
            coords: self.coordinates(),
            created_at,
        })
    }
}

/// Everything the form screen holds for one user
#[derive(Debug, Clone, Default)]
pub struct DraftState {
    pub draft: FormDraft,
    pub search_query: String,
    pub search_results: Vec<Place>,
    pub pin: Option<LatLng>,
    search_generation: RequestGeneration,
    reverse_generation: RequestGeneration,
    last_center: Option<LatLng>,
}

impl DraftState {
    /// Apply a partial edit. Nothing changes if the style value is unknown.
    pub fn apply_edit(&mut self, edit: DraftEdit) -> Result<(), ApiError> {
        let style = match edit.style.as_deref() {
            Some(value) => Some(StyleChoice::parse(value).ok_or_else(|| {
                ApiError::ValidationError(format!("style: Unknown style '{}'", value.trim()))
            })?),
            None => None,
        };

        let draft = &mut self.draft;
        if let Some(style) = style {
            draft.style = style;
        }
        if let Some(custom_style) = edit.custom_style {
            draft.custom_style = custom_style;
        }
        if let Some(name) = edit.name {
            draft.name = name;
        }
        if let Some(neighborhood) = edit.neighborhood {
            draft.neighborhood = neighborhood;
        }
        if let Some(note) = edit.note {
            draft.note = note;
        }
        if let Some(address) = edit.address {
            draft.address = address;
        }
        if let Some(lat) = edit.lat {
            draft.lat = lat;
        }
        if let Some(lng) = edit.lng {
            draft.lng = lng;
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Search autofill
    // ------------------------------------------------------------------------

    /// Record the query and issue a search token. Queries that are too short
    /// clear the result list and issue nothing.
    pub fn begin_search(&mut self, query: &str) -> Option<GenerationToken> {
        self.search_query = query.to_string();
        if query.trim().chars().count() < MIN_QUERY_CHARS {
            self.search_results.clear();
            self.search_generation.invalidate();
            return None;
        }
        Some(self.search_generation.issue())
    }

    /// Store results unless a newer search has been issued since
    pub fn apply_search_results(&mut self, token: GenerationToken, results: Vec<Place>) -> bool {
        if !self.search_generation.is_current(token) {
            debug!("Discarding superseded search results");
            return false;
        }
        self.search_results = results;
        true
    }

    /// Fill the form from a search result and clear the search box
    pub fn apply_search_result(&mut self, place: &Place) {
        let draft = &mut self.draft;
        draft.name = place.primary_label();
        draft.neighborhood = place.neighborhood();
        draft.address = place.full_address();

        match place.coordinates() {
            Some(at) => {
                draft.set_coordinates(at);
                self.pin = Some(at);
            }
            None => {
                draft.lat = place.lat.clone();
                draft.lng = place.lon.clone();
            }
        }

        self.search_query.clear();
        self.search_results.clear();
        self.search_generation.invalidate();
        // A pending map-click lookup must not overwrite the chosen place
        self.reverse_generation.invalidate();
    }

    pub fn select_search_result(&mut self, index: usize) -> Result<(), ApiError> {
        let place = self
            .search_results
            .get(index)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("No search result at index {}", index)))?;
        self.apply_search_result(&place);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Map-click autofill
    // ------------------------------------------------------------------------

    /// Drop the pin and coordinates right away; the address arrives later
    /// through `apply_reverse_result` with the returned token
    pub fn place_pin(&mut self, at: LatLng) -> GenerationToken {
        self.pin = Some(at);
        self.draft.set_coordinates(at);
        self.reverse_generation.issue()
    }

    pub fn apply_reverse_result(&mut self, token: GenerationToken, place: &Place) -> bool {
        if !self.reverse_generation.is_current(token) {
            debug!("Discarding superseded reverse geocode result");
            return false;
        }

        let label = place.primary_label();
        if !label.is_empty() {
            self.draft.name = label;
        }
        self.draft.neighborhood = place.neighborhood();
        self.draft.address = place.full_address();
        true
    }

    // ------------------------------------------------------------------------
    // Photo
    // ------------------------------------------------------------------------

    /// On any rejection the previous photo (or none) is kept
    pub fn attach_photo(&mut self, upload: &PhotoUpload) -> Result<(), PhotoError> {
        let data_url = encode_photo(upload)?;
        self.draft.photo = Some(data_url);
        Ok(())
    }

    pub fn clear_photo(&mut self) {
        self.draft.photo = None;
    }

    // ------------------------------------------------------------------------
    // Submit
    // ------------------------------------------------------------------------

    /// Build the spot and reset the form. The form is untouched on failure.
    pub fn take_submission(
        &mut self,
        id: String,
        user_id: &str,
        created_at: String,
    ) -> Result<Spot, ValidationResult> {
        let spot = self.draft.to_spot(id, user_id, created_at)?;
        self.reset();
        Ok(spot)
    }

    /// Back to an empty form. In-flight lookups become stale.
    pub fn reset(&mut self) {
        self.draft = FormDraft::default();
        self.search_query.clear();
        self.search_results.clear();
        self.pin = None;
        self.search_generation.invalidate();
        self.reverse_generation.invalidate();
    }

    // ------------------------------------------------------------------------
    // Map centering
    // ------------------------------------------------------------------------

    /// Remember the center last shown; returns whether it moved
    pub fn swap_center(&mut self, center: LatLng) -> bool {
        let moved = self.last_center != Some(center);
        self.last_center = Some(center);
        moved
    }
}
