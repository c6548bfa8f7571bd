//! Other collectors' spots that can be overlaid on the map

use async_trait::async_trait;

use crate::common::LatLng;
use crate::spots::Spot;

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignCollection {
    pub owner: String,
    pub spots: Vec<Spot>,
}

/// Source of collections belonging to other users. The bundled
/// implementation is static; a live backend can be dropped in behind this.
#[async_trait]
pub trait ForeignCollectionSource: Send + Sync {
    async fn collections(&self) -> Vec<ForeignCollection>;

    async fn collection(&self, owner: &str) -> Option<ForeignCollection> {
        self.collections()
            .await
            .into_iter()
            .find(|c| c.owner.eq_ignore_ascii_case(owner.trim()))
    }
}

pub struct StaticForeignCollections {
    collections: Vec<ForeignCollection>,
}

impl StaticForeignCollections {
    pub fn new(collections: Vec<ForeignCollection>) -> Self {
        Self { collections }
    }
}

fn sample_spot(
    owner: &str,
    id: &str,
    name: &str,
    neighborhood: &str,
    style: &str,
    coords: Option<(f64, f64)>,
) -> Spot {
    Spot {
        id: id.to_string(),
        user_id: owner.to_string(),
        name: name.to_string(),
        neighborhood: neighborhood.to_string(),
        style: style.to_string(),
        note: String::new(),
        address: None,
        photo: None,
        coords: coords.and_then(|(lat, lng)| LatLng::new(lat, lng)),
        created_at: String::new(),
    }
}

impl Default for StaticForeignCollections {
    fn default() -> Self {
        Self::new(vec![
            ForeignCollection {
                owner: "maya".to_string(),
                spots: vec![
                    sample_spot(
                        "maya",
                        "1700000000001",
                        "St Paul's Cathedral",
                        "City of London",
                        "Baroque",
                        Some((51.51383, -0.09841)),
                    ),
                    sample_spot(
                        "maya",
                        "1700000000002",
                        "Barbican Estate",
                        "Barbican",
                        "Brutalist",
                        Some((51.52003, -0.09373)),
                    ),
                    sample_spot(
                        "maya",
                        "1700000000003",
                        "Lloyd's Building",
                        "City of London",
                        "High-Tech",
                        Some((51.51290, -0.08230)),
                    ),
                    sample_spot(
                        "maya",
                        "1700000000004",
                        "Corner pub on Ropemaker St",
                        "Moorgate",
                        "Victorian",
                        None,
                    ),
                ],
            },
            ForeignCollection {
                owner: "theo".to_string(),
                spots: vec![
                    sample_spot(
                        "theo",
                        "1700000000101",
                        "Battersea Power Station",
                        "Nine Elms",
                        "Art Deco",
                        Some((51.48186, -0.14442)),
                    ),
                    sample_spot(
                        "theo",
                        "1700000000102",
                        "Natural History Museum",
                        "South Kensington",
                        "Romanesque",
                        Some((51.49671, -0.17636)),
                    ),
                ],
            },
        ])
    }
}

#[async_trait]
impl ForeignCollectionSource for StaticForeignCollections {
    async fn collections(&self) -> Vec<ForeignCollection> {
        self.collections.clone()
    }
}
