// src/spots/mod.rs

pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod store;


// Re-export commonly used items
pub use models::Spot;
pub use repository::{RemoteSpotRepository, SpotRepository, SqliteSpotRepository};
pub use routes::spots_routes;
pub use store::SpotStore;
