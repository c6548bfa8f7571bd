// src/services/mod.rs
//
// Clients for the external services the app delegates to

pub mod backend;
pub mod geocode;

// Re-export commonly used types for convenience
pub use backend::{BackendClient, BackendError};
pub use geocode::{Geocoder, NominatimClient, Place};
