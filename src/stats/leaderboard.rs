//! Where the other leaderboard entries come from

use async_trait::async_trait;

use super::models::LeaderboardEntry;

/// Scores of other collectors. The bundled source is a fixed list; a live
/// backend only has to implement this trait.
#[async_trait]
pub trait LeaderboardSource: Send + Sync {
    async fn entries(&self) -> Vec<LeaderboardEntry>;
}

pub struct StaticLeaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl StaticLeaderboard {
    pub fn new(entries: Vec<LeaderboardEntry>) -> Self {
        Self { entries }
    }
}

impl Default for StaticLeaderboard {
    fn default() -> Self {
        let entry = |name: &str, score: u64| LeaderboardEntry {
            name: name.to_string(),
            score,
            is_current_user: false,
        };
        Self::new(vec![
            entry("maya", 185),
            entry("theo", 140),
            entry("priya", 120),
            entry("sam", 95),
            entry("jules", 60),
            entry("ren", 35),
            entry("alex", 20),
        ])
    }
}

#[async_trait]
impl LeaderboardSource for StaticLeaderboard {
    async fn entries(&self) -> Vec<LeaderboardEntry> {
        self.entries.clone()
    }
}
