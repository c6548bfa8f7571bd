//! Tests for the map view model

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::collection::{DraftState, FormDraft};
    use crate::common::{ApiError, LatLng};
    use crate::test_support::{spot, test_config, user, MemorySpotRepository, TestStateBuilder};
    use axum::extract::{Extension, Json, Query};
    use models::{MapQuery, MarkerVariant, StreetViewQuery};
    use std::sync::Arc;
    use view::{build_map_view, select_center, street_view_url, DEFAULT_ZOOM};

    const FALLBACK: LatLng = LatLng {
        lat: 51.5074,
        lng: -0.1278,
    };

    fn at(lat: f64, lng: f64) -> Option<LatLng> {
        LatLng::new(lat, lng)
    }

    #[test]
    fn test_center_prefers_first_spot_with_coordinates() {
        let spots = vec![
            spot("3", "user-1", "No coords", "Gothic", None),
            spot("2", "user-1", "Barbican Estate", "Brutalist", at(51.52003, -0.09373)),
            spot("1", "user-1", "Tate Modern", "Modernist", at(51.5076, -0.0994)),
        ];
        let draft = FormDraft {
            lat: "40.0".to_string(),
            lng: "-3.0".to_string(),
            ..Default::default()
        };

        assert_eq!(
            select_center(&spots, &draft, FALLBACK),
            LatLng {
                lat: 51.52003,
                lng: -0.09373
            }
        );
    }

    #[test]
    fn test_center_falls_back_to_draft_then_default() {
        let spots = vec![spot("1", "user-1", "No coords", "Gothic", None)];
        let draft = FormDraft {
            lat: "40.0".to_string(),
            lng: "-3.0".to_string(),
            ..Default::default()
        };
        assert_eq!(
            select_center(&spots, &draft, FALLBACK),
            LatLng { lat: 40.0, lng: -3.0 }
        );

        let half = FormDraft {
            lat: "40.0".to_string(),
            ..Default::default()
        };
        assert_eq!(select_center(&spots, &half, FALLBACK), FALLBACK);
    }

    #[test]
    fn test_markers_skip_spots_without_coordinates() {
        let spots = vec![
            spot("2", "user-1", "Barbican Estate", "Brutalist", at(51.52003, -0.09373)),
            spot("1", "user-1", "No coords", "Gothic", None),
        ];
        let config = test_config();

        let view = build_map_view(
            &spots,
            None,
            &DraftState::default(),
            &config.map,
            FALLBACK,
            false,
        );

        assert_eq!(view.markers.len(), 1);
        assert_eq!(view.markers[0].name, "Barbican Estate");
        assert_eq!(view.markers[0].variant, MarkerVariant::Owned);
        assert_eq!(view.zoom, DEFAULT_ZOOM);
        assert!(view.transition.is_none());
        assert!(view.pin.is_none());
        assert!(view.foreign_owner.is_none());
    }

    #[test]
    fn test_foreign_markers_carry_owner() {
        let foreign = ForeignCollection {
            owner: "maya".to_string(),
            spots: vec![
                spot("9", "maya", "St Paul's Cathedral", "Baroque", at(51.51383, -0.09841)),
                spot("8", "maya", "Pub", "Victorian", None),
            ],
        };
        let config = test_config();

        let view = build_map_view(
            &[],
            Some(&foreign),
            &DraftState::default(),
            &config.map,
            FALLBACK,
            true,
        );

        assert_eq!(view.markers.len(), 1);
        assert_eq!(view.markers[0].variant, MarkerVariant::Foreign);
        assert_eq!(view.markers[0].owner.as_deref(), Some("maya"));
        assert_eq!(view.foreign_owner.as_deref(), Some("maya"));
        let transition = view.transition.expect("moved");
        assert_eq!(transition.center, FALLBACK);
        assert_eq!(transition.duration_secs, 1.5);
    }

    #[test]
    fn test_pending_pin_is_shown() {
        let mut draft = DraftState::default();
        draft.place_pin(LatLng { lat: 51.5, lng: -0.1 });
        let config = test_config();

        let view = build_map_view(&[], None, &draft, &config.map, FALLBACK, false);
        let pin = view.pin.expect("pin");
        assert_eq!(pin.position, LatLng { lat: 51.5, lng: -0.1 });
        assert_eq!(pin.label, "new spot");
    }

    #[test]
    fn test_street_view_url() {
        let url = street_view_url("k&y", LatLng { lat: 51.5, lng: -0.1 });
        assert!(url.starts_with("https://www.google.com/maps/embed/v1/streetview?key=k%26y"));
        assert!(url.contains("location=51.5,-0.1"));
    }

    #[tokio::test]
    async fn test_static_collection_lookup_is_case_insensitive() {
        let source = StaticForeignCollections::default();
        assert_eq!(source.collections().await.len(), 2);
        assert!(source.collection("MAYA").await.is_some());
        assert!(source.collection("nobody").await.is_none());
    }

    #[tokio::test]
    async fn test_map_handler_transitions_only_when_center_moves() {
        let repository = Arc::new(MemorySpotRepository::with_spots(vec![spot(
            "1",
            "user-1",
            "Tate Modern",
            "Modernist",
            at(51.5076, -0.0994),
        )]));
        let state = TestStateBuilder::new().repository(repository).build_locked();
        let maya = user("user-1", "maya@archy.app");

        let Json(first) = handlers::get_map(
            Extension(state.clone()),
            maya.clone(),
            Query(MapQuery::default()),
        )
        .await
        .expect("map");
        assert!(first.transition.is_some());

        let Json(second) = handlers::get_map(
            Extension(state.clone()),
            maya.clone(),
            Query(MapQuery::default()),
        )
        .await
        .expect("map");
        assert!(second.transition.is_none());
        assert_eq!(second.center, first.center);

        let err = handlers::get_map(
            Extension(state),
            maya,
            Query(MapQuery {
                show: Some("nobody".to_string()),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_street_view_requires_key() {
        let state = TestStateBuilder::new().build_locked();
        let err = handlers::street_view(
            Extension(state),
            user("user-1", "maya@archy.app"),
            Query(StreetViewQuery { lat: 51.5, lng: -0.1 }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::ServiceUnavailable(_)));

        let state = TestStateBuilder::new()
            .config(|c| c.map.street_view_api_key = Some("key".to_string()))
            .build_locked();
        let Json(response) = handlers::street_view(
            Extension(state),
            user("user-1", "maya@archy.app"),
            Query(StreetViewQuery { lat: 51.5, lng: -0.1 }),
        )
        .await
        .expect("street view");
        assert!(response.embed_url.contains("key=key"));
    }
}
