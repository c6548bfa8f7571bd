// src/stats/mod.rs

pub mod engine;
pub mod handlers;
pub mod leaderboard;
pub mod models;
pub mod routes;


pub use leaderboard::{LeaderboardSource, StaticLeaderboard};
pub use routes::stats_routes;
