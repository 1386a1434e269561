//! Composite efficiency ranking

use crate::analytics::player_stats::player_summaries;
use crate::types::{EnrichedMatch, Player, PlayerId};
use crate::utils::descending;
use serde::{Deserialize, Serialize};

/// Default weight of the match win rate in the composite score
pub const WIN_RATE_WEIGHT: f64 = 0.7;

/// Default weight of the game win share in the composite score
pub const GAME_SHARE_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub matches_played: u32,
    pub win_rate: f64,
    pub game_share: f64,
    pub score: f64,
}

/// Rank players with at least `min_matches` decisive matches by
/// `0.7 * win_rate + 0.3 * game_share`. Games from undecided stored matches
/// are not counted.
pub fn efficiency_ranking(
    players: &[Player],
    matches: &[EnrichedMatch],
    min_matches: u32,
) -> Vec<EfficiencyEntry> {
    efficiency_ranking_weighted(
        players,
        matches,
        min_matches,
        WIN_RATE_WEIGHT,
        GAME_SHARE_WEIGHT,
    )
}

/// Same as [`efficiency_ranking`] with explicit weights
pub fn efficiency_ranking_weighted(
    players: &[Player],
    matches: &[EnrichedMatch],
    min_matches: u32,
    win_rate_weight: f64,
    game_share_weight: f64,
) -> Vec<EfficiencyEntry> {
    let mut ranking: Vec<EfficiencyEntry> = player_summaries(players, matches)
        .into_iter()
        .filter(|s| s.matches_played >= min_matches)
        .map(|s| {
            let win_rate = s.win_rate();
            let game_share = s.game_share();
            EfficiencyEntry {
                score: win_rate_weight * win_rate + game_share_weight * game_share,
                player_id: s.player_id,
                name: s.name,
                matches_played: s.matches_played,
                win_rate,
                game_share,
            }
        })
        .collect();

    ranking.sort_by(|a, b| descending(a.score, b.score));
    ranking
}
