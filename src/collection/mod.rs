// src/collection/mod.rs
//
// The new-spot form: draft fields, search and map-click autofill, photo
// attachment and submission into the spot store.

pub mod book;
pub mod draft;
pub mod generation;
pub mod handlers;
pub mod models;
pub mod photo;
pub mod routes;
pub mod styles;
pub mod validators;


pub use book::DraftBook;
pub use draft::{DraftState, FormDraft};
pub use routes::collection_routes;
