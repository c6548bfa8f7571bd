// src/map/mod.rs

pub mod handlers;
pub mod models;
pub mod routes;
pub mod sources;
pub mod view;

#[cfg(test)]
mod tests;

pub use routes::map_routes;
pub use sources::{ForeignCollection, ForeignCollectionSource, StaticForeignCollections};
