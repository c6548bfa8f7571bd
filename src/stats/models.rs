// src/stats/models.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Derived figures for one collection
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub total_spots: usize,
    /// Badge tallies: style label → number of spots
    pub style_counts: BTreeMap<String, usize>,
    pub distinct_styles: usize,
    pub distinct_neighborhoods: usize,
    pub score: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
    #[serde(default)]
    pub is_current_user: bool,
}

#[derive(Serialize, Debug)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
}
