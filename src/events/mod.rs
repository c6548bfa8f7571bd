//! # Events Module
//!
//! Subscriber notification for application-state changes: a broadcast bus
//! fed by the spot store, the draft book and the auth handlers, and a
//! websocket endpoint that forwards each user's events.

pub mod bus;
pub mod handlers;
pub mod routes;

pub use bus::{AppEvent, EventBus};
pub use routes::events_routes;
