//! Leaderboard configuration

use serde::{Deserialize, Serialize};

/// Settings for the derived leaderboards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Number of top-rated players tracked by the podium timeline
    pub podium_size: usize,
    /// Minimum matches for the efficiency and hardest-to-beat rankings
    pub min_matches: u32,
    pub win_rate_weight: f64,
    pub game_share_weight: f64,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            podium_size: 3,
            min_matches: 3,
            win_rate_weight: 0.7,
            game_share_weight: 0.3,
        }
    }
}
