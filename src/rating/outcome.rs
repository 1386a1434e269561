//! Set and outcome evaluation
//!
//! Reduces a best-of-three set list to set and game totals plus the
//! decisive side, if any.

use crate::types::{Set, Side};
use serde::{Deserialize, Serialize};

/// Aggregated result of a list of sets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub sets_a: u32,
    pub sets_b: u32,
    pub games_a: u32,
    pub games_b: u32,
    pub winner: Option<Side>,
}

impl Outcome {
    pub fn is_decisive(&self) -> bool {
        self.winner.is_some()
    }

    /// Game totals as (winner, loser); `None` for a tie
    pub fn winner_games(&self) -> Option<(u32, u32)> {
        match self.winner? {
            Side::A => Some((self.games_a, self.games_b)),
            Side::B => Some((self.games_b, self.games_a)),
        }
    }
}

/// Evaluate a list of sets.
///
/// Empty sets are skipped. A set is won by the side with strictly more
/// games; games are accumulated regardless. The winner is the side with a
/// strict majority of won sets, otherwise `None`. Game totals saturate.
pub fn evaluate_outcome(sets: &[Set]) -> Outcome {
    let mut outcome = Outcome::default();

    for set in sets.iter().filter(|s| !s.is_empty()) {
        if set.a > set.b {
            outcome.sets_a += 1;
        } else if set.b > set.a {
            outcome.sets_b += 1;
        }
        outcome.games_a = outcome.games_a.saturating_add(set.a);
        outcome.games_b = outcome.games_b.saturating_add(set.b);
    }

    outcome.winner = match outcome.sets_a.cmp(&outcome.sets_b) {
        std::cmp::Ordering::Greater => Some(Side::A),
        std::cmp::Ordering::Less => Some(Side::B),
        std::cmp::Ordering::Equal => None,
    };

    outcome
}
