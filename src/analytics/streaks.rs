//! Win/loss streaks and the hardest-to-beat ranking

use crate::analytics::player_stats::{player_summaries, PlayerSummary};
use crate::types::{EnrichedMatch, MatchResult, Player, PlayerId};
use crate::utils::ratio;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Kind of the streak a player is currently on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakType {
    Win,
    Loss,
    None,
}

impl From<MatchResult> for StreakType {
    fn from(result: MatchResult) -> Self {
        match result {
            MatchResult::Win => StreakType::Win,
            MatchResult::Loss => StreakType::Loss,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub matches_played: u32,
    pub best_win_streak: u32,
    pub best_loss_streak: u32,
    pub current_streak: u32,
    pub streak_type: StreakType,
}

impl StreakEntry {
    /// Length of the running streak if it is a winning one
    pub fn current_win_streak(&self) -> u32 {
        if self.streak_type == StreakType::Win {
            self.current_streak
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardestToBeatEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub matches_played: u32,
    pub losses: u32,
    pub loss_rate: f64,
}

fn streaks_for(summary: &PlayerSummary) -> StreakEntry {
    let mut entry = StreakEntry {
        player_id: summary.player_id.clone(),
        name: summary.name.clone(),
        matches_played: summary.matches_played,
        best_win_streak: 0,
        best_loss_streak: 0,
        current_streak: 0,
        streak_type: StreakType::None,
    };

    for result in summary.results() {
        let kind = StreakType::from(result);
        if kind == entry.streak_type {
            entry.current_streak += 1;
        } else {
            entry.streak_type = kind;
            entry.current_streak = 1;
        }

        match kind {
            StreakType::Win => entry.best_win_streak = entry.best_win_streak.max(entry.current_streak),
            StreakType::Loss => {
                entry.best_loss_streak = entry.best_loss_streak.max(entry.current_streak)
            }
            StreakType::None => {}
        }
    }

    entry
}

/// Streaks for every player with at least one decisive match, ordered by
/// best win streak, then by the running win streak
pub fn streak_ranking(players: &[Player], matches: &[EnrichedMatch]) -> Vec<StreakEntry> {
    let mut ranking: Vec<StreakEntry> = player_summaries(players, matches)
        .iter()
        .filter(|s| s.matches_played > 0)
        .map(streaks_for)
        .collect();

    ranking.sort_by(|a, b| {
        b.best_win_streak
            .cmp(&a.best_win_streak)
            .then_with(|| b.current_win_streak().cmp(&a.current_win_streak()))
    });
    ranking
}

/// Players with at least `min_matches` decisive matches, lowest loss rate
/// first; equal rates favour the larger sample
pub fn hardest_to_beat_ranking(
    players: &[Player],
    matches: &[EnrichedMatch],
    min_matches: u32,
) -> Vec<HardestToBeatEntry> {
    let mut ranking: Vec<HardestToBeatEntry> = player_summaries(players, matches)
        .into_iter()
        .filter(|s| s.matches_played >= min_matches)
        .map(|s| HardestToBeatEntry {
            loss_rate: ratio(s.losses, s.matches_played),
            player_id: s.player_id,
            name: s.name,
            matches_played: s.matches_played,
            losses: s.losses,
        })
        .collect();

    ranking.sort_by(|a, b| {
        a.loss_rate
            .partial_cmp(&b.loss_rate)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.matches_played.cmp(&a.matches_played))
    });
    ranking
}
