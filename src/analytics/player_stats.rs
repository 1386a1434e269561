//! Per-player summaries and standings

use crate::types::{EnrichedMatch, MatchId, MatchResult, Player, PlayerId};
use crate::utils::{descending, ratio};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A player's rating right after one of their matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingPoint {
    pub match_id: MatchId,
    pub date: DateTime<Utc>,
    pub rating: f64,
    pub result: MatchResult,
}

/// Aggregated record of one player across the decisive match log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub player_id: PlayerId,
    pub name: String,
    pub rating: f64,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub peak_rating: Option<f64>,
    pub history: Vec<RatingPoint>,
}

impl PlayerSummary {
    fn empty(player: &Player) -> Self {
        Self {
            player_id: player.id.clone(),
            name: player.name.clone(),
            rating: player.rating,
            matches_played: 0,
            wins: 0,
            losses: 0,
            games_won: 0,
            games_lost: 0,
            peak_rating: None,
            history: Vec::new(),
        }
    }

    pub fn win_rate(&self) -> f64 {
        ratio(self.wins, self.matches_played)
    }

    pub fn loss_rate(&self) -> f64 {
        ratio(self.losses, self.matches_played)
    }

    /// Share of all games in the player's matches that their side won
    pub fn game_share(&self) -> f64 {
        ratio(self.games_won, self.games_won.saturating_add(self.games_lost))
    }

    /// Results in chronological order
    pub fn results(&self) -> impl Iterator<Item = MatchResult> + '_ {
        self.history.iter().map(|point| point.result)
    }
}

/// Summaries for every roster player, in roster order.
///
/// Only decisive matches count: a stored match without a winner adds
/// nothing to matches played, games or history. `matches` is expected in
/// replay order.
pub fn player_summaries(players: &[Player], matches: &[EnrichedMatch]) -> Vec<PlayerSummary> {
    players
        .iter()
        .map(|player| {
            let mut summary = PlayerSummary::empty(player);

            for enriched in matches {
                let Some(result) = enriched.result_for(&player.id) else {
                    continue;
                };
                let (won, lost) = enriched.games_for(&player.id).unwrap_or((0, 0));

                summary.matches_played += 1;
                match result {
                    MatchResult::Win => summary.wins += 1,
                    MatchResult::Loss => summary.losses += 1,
                }
                summary.games_won = summary.games_won.saturating_add(won);
                summary.games_lost = summary.games_lost.saturating_add(lost);

                if let Some(&rating) = enriched.ratings_after.get(&player.id) {
                    summary.peak_rating = Some(summary.peak_rating.map_or(rating, |p| p.max(rating)));
                    summary.history.push(RatingPoint {
                        match_id: enriched.record.id.clone(),
                        date: enriched.record.date,
                        rating,
                        result,
                    });
                }
            }

            summary
        })
        .collect()
}

/// Roster sorted by rating, highest first; equal ratings keep roster order
pub fn standings(players: &[Player]) -> Vec<Player> {
    let mut sorted = players.to_vec();
    sorted.sort_by(|a, b| descending(a.rating, b.rating));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::recompute;
    use crate::types::{Match, Set};
    use chrono::{Duration, TimeZone};

    fn league() -> (Vec<Player>, Vec<Match>) {
        let players = ["a", "b", "c", "d"]
            .iter()
            .map(|id| Player::new(*id, id.to_uppercase(), 1000.0))
            .collect();
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let team = |x: &str, y: &str| [x.to_string(), y.to_string()];
        let matches = vec![
            Match {
                id: "m1".into(),
                date: start,
                team_a: team("a", "b"),
                team_b: team("c", "d"),
                sets: vec![Set::new(6, 2), Set::new(6, 3)],
            },
            Match {
                id: "m2".into(),
                date: start + Duration::days(1),
                team_a: team("a", "c"),
                team_b: team("b", "d"),
                sets: vec![Set::new(4, 6), Set::new(6, 7)],
            },
        ];
        (players, matches)
    }

    #[test]
    fn test_player_summary() {
        let (players, matches) = league();
        let outcome = recompute(&players, &matches);
        let summaries = player_summaries(&outcome.players, &outcome.matches);

        let a = &summaries[0];
        assert_eq!(a.player_id, "a");
        assert_eq!(a.matches_played, 2);
        assert_eq!(a.wins, 1);
        assert_eq!(a.losses, 1);
        assert_eq!(a.games_won, 22);
        assert_eq!(a.games_lost, 18);
        assert_eq!(a.win_rate(), 0.5);
        assert_eq!(a.history.len(), 2);
        assert_eq!(a.peak_rating, Some(1047.0));
        assert_eq!(a.history[1].rating, a.rating);
    }

    #[test]
    fn test_player_without_matches() {
        let players = vec![Player::new("solo", "Solo", 1000.0)];
        let summaries = player_summaries(&players, &[]);
        assert_eq!(summaries[0].matches_played, 0);
        assert_eq!(summaries[0].win_rate(), 0.0);
        assert_eq!(summaries[0].game_share(), 0.0);
        assert_eq!(summaries[0].peak_rating, None);
    }

    #[test]
    fn test_standings_order() {
        let players = vec![
            Player::new("low", "Low", 950.0),
            Player::new("high", "High", 1100.0),
            Player::new("mid", "Mid", 1000.0),
            Player::new("mid2", "Mid Two", 1000.0),
        ];
        let ids: Vec<_> = standings(&players).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["high", "mid", "mid2", "low"]);
    }

    #[test]
    fn test_undecided_match_not_counted() {
        let (players, mut matches) = league();
        matches[1].sets = vec![Set::new(6, 4), Set::new(4, 6)];

        let outcome = recompute(&players, &matches);
        let summaries = player_summaries(&outcome.players, &outcome.matches);

        let a = &summaries[0];
        assert_eq!(a.matches_played, 1);
        assert_eq!(a.games_won, 12);
        assert_eq!(a.games_lost, 5);
        assert_eq!(a.history.len(), 1);
    }

    #[test]
    fn test_game_share_saturates() {
        let mut summary = PlayerSummary::empty(&Player::new("a", "A", 1000.0));
        summary.games_won = u32::MAX;
        summary.games_lost = 10;
        assert_eq!(summary.game_share(), 1.0);
    }
}
