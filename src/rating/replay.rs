//! Full replay of the match log
//!
//! Every invocation resets the roster to the baseline rating and replays all
//! matches in chronological order. There is no incremental rating state.

use crate::error::{LeagueError, Result};
use crate::rating::formula::{PointsFormula, TeamRatings};
use crate::rating::outcome::evaluate_outcome;
use crate::types::{EnrichedMatch, Match, Player, PlayerId, Side, DEFAULT_BASELINE_RATING};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Freshly computed roster and enriched match log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayOutcome {
    /// Roster in input order with replayed ratings and records
    pub players: Vec<Player>,
    /// Matches in replay (chronological) order
    pub matches: Vec<EnrichedMatch>,
}

impl ReplayOutcome {
    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }
}

/// Replays match logs against a baseline roster
#[derive(Debug, Clone)]
pub struct RatingEngine {
    baseline_rating: f64,
    formula: PointsFormula,
}

impl Default for RatingEngine {
    fn default() -> Self {
        Self {
            baseline_rating: DEFAULT_BASELINE_RATING,
            formula: PointsFormula::default(),
        }
    }
}

/// Mutable roster used during a single replay pass
struct WorkingRoster {
    players: Vec<Player>,
    index: HashMap<PlayerId, usize>,
    baseline_rating: f64,
}

impl WorkingRoster {
    fn reset(players: &[Player], baseline_rating: f64) -> Self {
        let players: Vec<Player> = players
            .iter()
            .map(|p| Player::new(p.id.clone(), p.name.clone(), baseline_rating))
            .collect();
        let index = players
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();

        Self {
            players,
            index,
            baseline_rating,
        }
    }

    fn rating(&self, player_id: &str) -> f64 {
        self.index
            .get(player_id)
            .map(|&i| self.players[i].rating)
            .unwrap_or(self.baseline_rating)
    }

    fn team_ratings(&self, record: &Match) -> TeamRatings {
        TeamRatings {
            team_a: [self.rating(&record.team_a[0]), self.rating(&record.team_a[1])],
            team_b: [self.rating(&record.team_b[0]), self.rating(&record.team_b[1])],
        }
    }

    fn apply(&mut self, player_id: &str, delta: f64, won: bool) {
        if let Some(&i) = self.index.get(player_id) {
            let player = &mut self.players[i];
            player.rating += delta;
            if won {
                player.wins += 1;
            } else {
                player.losses += 1;
            }
        }
    }

    fn ratings_after(&self, record: &Match) -> BTreeMap<PlayerId, f64> {
        record
            .participants()
            .filter_map(|id| {
                self.index
                    .get(id)
                    .map(|&i| (id.clone(), self.players[i].rating))
            })
            .collect()
    }
}

impl RatingEngine {
    /// Create an engine with a custom baseline and formula
    pub fn new(baseline_rating: f64, formula: PointsFormula) -> Result<Self> {
        if !baseline_rating.is_finite() {
            return Err(LeagueError::ConfigurationError {
                message: format!("Baseline rating must be finite, got {}", baseline_rating),
            }
            .into());
        }

        Ok(Self {
            baseline_rating,
            formula,
        })
    }

    pub fn baseline_rating(&self) -> f64 {
        self.baseline_rating
    }

    pub fn formula(&self) -> &PointsFormula {
        &self.formula
    }

    /// Replay the whole log from baseline.
    ///
    /// Incoming player ratings and records are ignored; only identity and
    /// names are taken from `players`. Matches are processed by ascending
    /// date, ties keeping their log order.
    pub fn recompute(&self, players: &[Player], matches: &[Match]) -> ReplayOutcome {
        let mut roster = WorkingRoster::reset(players, self.baseline_rating);

        let mut ordered: Vec<&Match> = matches.iter().collect();
        ordered.sort_by_key(|m| m.date);

        let mut enriched = Vec::with_capacity(ordered.len());
        for record in ordered {
            enriched.push(self.replay_match(&mut roster, record));
        }

        debug!(
            "Replayed {} matches for {} players",
            enriched.len(),
            roster.players.len()
        );

        ReplayOutcome {
            players: roster.players,
            matches: enriched,
        }
    }

    fn replay_match(&self, roster: &mut WorkingRoster, record: &Match) -> EnrichedMatch {
        for player_id in record.participants() {
            if !roster.index.contains_key(player_id) {
                warn!(
                    "Match {} references unknown player '{}', using baseline rating",
                    record.id, player_id
                );
            }
        }

        let ratings = roster.team_ratings(record);
        let outcome = evaluate_outcome(&record.sets);

        let Some(award) = self.formula.compute(&ratings, &outcome) else {
            warn!("Match {} has no decisive winner, skipping rating update", record.id);
            return EnrichedMatch {
                record: record.clone(),
                sets_a: outcome.sets_a,
                sets_b: outcome.sets_b,
                games_a: outcome.games_a,
                games_b: outcome.games_b,
                winner: None,
                delta_a: 0.0,
                delta_b: 0.0,
                points: 0.0,
                formula: "no decisive winner".to_string(),
                ratings_after: roster.ratings_after(record),
            };
        };

        for side in [Side::A, Side::B] {
            let delta = match side {
                Side::A => award.delta_a,
                Side::B => award.delta_b,
            };
            let won = side == award.winner;
            for player_id in record.team(side) {
                roster.apply(player_id, delta, won);
            }
        }

        EnrichedMatch {
            record: record.clone(),
            sets_a: outcome.sets_a,
            sets_b: outcome.sets_b,
            games_a: outcome.games_a,
            games_b: outcome.games_b,
            winner: Some(award.winner),
            delta_a: award.delta_a,
            delta_b: award.delta_b,
            points: award.points,
            formula: award.trace,
            ratings_after: roster.ratings_after(record),
        }
    }
}

/// Replay with the default engine (baseline 1000, divisor 100, capped-linear factor)
pub fn recompute(players: &[Player], matches: &[Match]) -> ReplayOutcome {
    RatingEngine::default().recompute(players, matches)
}
