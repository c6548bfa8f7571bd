//! # Auth Module
//!
//! The gate in front of everything else:
//! - credential endpoints delegating to the external auth service
//! - the `AuthedUser` extractor for protected routes
//! - the `AuthBackend` seam so another auth provider can be plugged in

pub mod backend;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod validators;

#[cfg(test)]
mod tests;

pub use backend::AuthBackend;
pub use extractors::AuthedUser;
pub use models::SessionUser;
pub use routes::auth_routes;
