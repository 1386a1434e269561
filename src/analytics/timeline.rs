//! Podium rating timeline for charting

use crate::analytics::player_stats::standings;
use crate::types::{EnrichedMatch, MatchId, Player, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ratings of the tracked players after one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    pub match_id: MatchId,
    pub date: DateTime<Utc>,
    /// `None` until the player has played their first match
    pub ratings: BTreeMap<PlayerId, Option<f64>>,
}

/// Chronological rating series for a set of tracked players
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PodiumTimeline {
    /// Tracked players, best rated first
    pub tracked: Vec<Player>,
    pub points: Vec<TimelinePoint>,
}

impl PodiumTimeline {
    /// Rating series of a single tracked player
    pub fn series(&self, player_id: &str) -> Vec<Option<f64>> {
        self.points
            .iter()
            .map(|point| point.ratings.get(player_id).copied().flatten())
            .collect()
    }
}

/// The `n` highest rated players
pub fn top_players(players: &[Player], n: usize) -> Vec<Player> {
    standings(players).into_iter().take(n).collect()
}

/// Rating trajectory of the top `top_n` players across the replayed matches.
///
/// Each point holds every tracked player's latest rating as of that match.
pub fn podium_timeline(
    players: &[Player],
    matches: &[EnrichedMatch],
    top_n: usize,
) -> PodiumTimeline {
    let tracked = top_players(players, top_n);

    let mut current: BTreeMap<PlayerId, Option<f64>> =
        tracked.iter().map(|p| (p.id.clone(), None)).collect();

    let points = matches
        .iter()
        .map(|enriched| {
            for (player_id, rating) in current.iter_mut() {
                if let Some(&after) = enriched.ratings_after.get(player_id) {
                    *rating = Some(after);
                }
            }

            TimelinePoint {
                match_id: enriched.record.id.clone(),
                date: enriched.record.date,
                ratings: current.clone(),
            }
        })
        .collect();

    PodiumTimeline { tracked, points }
}
