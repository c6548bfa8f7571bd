//! Pure derivations over a spot collection

use std::collections::{BTreeMap, HashSet};

use super::models::{LeaderboardEntry, StatsSnapshot};
use crate::spots::Spot;

pub const POINTS_PER_SPOT: u64 = 10;
pub const POINTS_PER_STYLE: u64 = 20;
pub const POINTS_PER_NEIGHBORHOOD: u64 = 15;

/// Entries shown on the leaderboard
pub const LEADERBOARD_SIZE: usize = 6;

pub fn score(spots: usize, distinct_styles: usize, distinct_neighborhoods: usize) -> u64 {
    spots as u64 * POINTS_PER_SPOT
        + distinct_styles as u64 * POINTS_PER_STYLE
        + distinct_neighborhoods as u64 * POINTS_PER_NEIGHBORHOOD
}

pub fn compute_stats(spots: &[Spot]) -> StatsSnapshot {
    let mut style_counts: BTreeMap<String, usize> = BTreeMap::new();
    for spot in spots {
        let style = spot.style.trim();
        if !style.is_empty() {
            *style_counts.entry(style.to_string()).or_insert(0) += 1;
        }
    }

    let distinct_neighborhoods = spots
        .iter()
        .map(|s| s.neighborhood.trim())
        .filter(|n| !n.is_empty())
        .collect::<HashSet<_>>()
        .len();

    let distinct_styles = style_counts.len();

    StatsSnapshot {
        total_spots: spots.len(),
        distinct_styles,
        distinct_neighborhoods,
        score: score(spots.len(), distinct_styles, distinct_neighborhoods),
        style_counts,
    }
}

/// Merge the current user into the other entries, highest score first.
/// Equal scores keep their input order (others before the current user).
pub fn build_leaderboard(
    current: LeaderboardEntry,
    others: Vec<LeaderboardEntry>,
) -> Vec<LeaderboardEntry> {
    let mut entries = others;
    entries.push(current);
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(LEADERBOARD_SIZE);
    entries
}
