//! Derived leaderboards
//!
//! Every function here is a pure function of the replay output and is
//! recomputed from scratch whenever the league changes.

pub mod couples;
pub mod efficiency;
pub mod player_stats;
pub mod streaks;
pub mod timeline;

// Re-export commonly used types
pub use couples::{couple_ranking, CoupleStats};
pub use efficiency::{efficiency_ranking, efficiency_ranking_weighted, EfficiencyEntry};
pub use player_stats::{player_summaries, standings, PlayerSummary, RatingPoint};
pub use streaks::{hardest_to_beat_ranking, streak_ranking, HardestToBeatEntry, StreakEntry, StreakType};
pub use timeline::{podium_timeline, top_players, PodiumTimeline, TimelinePoint};

use crate::config::AnalyticsSettings;
use crate::rating::ReplayOutcome;
use crate::types::Player;
use serde::{Deserialize, Serialize};

/// All leaderboards for one replay
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueReport {
    pub standings: Vec<Player>,
    pub podium: PodiumTimeline,
    pub couples: Vec<CoupleStats>,
    pub efficiency: Vec<EfficiencyEntry>,
    pub streaks: Vec<StreakEntry>,
    pub hardest_to_beat: Vec<HardestToBeatEntry>,
}

impl LeagueReport {
    pub fn build(outcome: &ReplayOutcome, settings: &AnalyticsSettings) -> Self {
        let players = &outcome.players;
        let matches = &outcome.matches;

        Self {
            standings: standings(players),
            podium: podium_timeline(players, matches, settings.podium_size),
            couples: couple_ranking(players, matches),
            efficiency: efficiency_ranking_weighted(
                players,
                matches,
                settings.min_matches,
                settings.win_rate_weight,
                settings.game_share_weight,
            ),
            streaks: streak_ranking(players, matches),
            hardest_to_beat: hardest_to_beat_ranking(players, matches, settings.min_matches),
        }
    }
}
