//! Points formula for doubles matches
//!
//! Turns a decisive outcome and the four participants' working ratings into
//! a zero-sum rating transfer. The underdog multiplier is a pluggable policy
//! behind the [`UnderdogFactor`] trait.

use crate::error::{LeagueError, Result};
use crate::rating::outcome::Outcome;
use crate::types::Side;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default league-wide normalisation divisor for the base magnitude
pub const DEFAULT_NORMALIZATION_DIVISOR: f64 = 100.0;

/// Multiplier rewarding a winning team that was rated below its opponents.
///
/// Implementations must be pure and deterministic, return `1.0` for a gap of
/// zero, be non-decreasing in `gap`, bounded above and strictly positive.
pub trait UnderdogFactor: Send + Sync + std::fmt::Debug {
    /// Multiplier for `gap = loser_sum - winner_sum`
    fn factor(&self, gap: f64) -> f64;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}

/// Policy that ignores the rating gap entirely
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatFactor;

impl UnderdogFactor for FlatFactor {
    fn factor(&self, _gap: f64) -> f64 {
        1.0
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({ "type": "flat" })
    }
}

/// Linear bonus on positive gaps, capped at `max_factor`
///
/// `factor(gap) = min(1 + max(gap, 0) / gap_scale, max_factor)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CappedLinearFactor {
    gap_scale: f64,
    max_factor: f64,
}

impl CappedLinearFactor {
    pub fn new(gap_scale: f64, max_factor: f64) -> Result<Self> {
        if !gap_scale.is_finite() || gap_scale <= 0.0 {
            return Err(LeagueError::ConfigurationError {
                message: format!("Gap scale must be positive, got {}", gap_scale),
            }
            .into());
        }

        if !max_factor.is_finite() || max_factor < 1.0 {
            return Err(LeagueError::ConfigurationError {
                message: format!("Max factor must be at least 1.0, got {}", max_factor),
            }
            .into());
        }

        Ok(Self {
            gap_scale,
            max_factor,
        })
    }

    pub fn gap_scale(&self) -> f64 {
        self.gap_scale
    }

    pub fn max_factor(&self) -> f64 {
        self.max_factor
    }
}

impl Default for CappedLinearFactor {
    fn default() -> Self {
        Self {
            gap_scale: 400.0,
            max_factor: 2.0,
        }
    }
}

impl UnderdogFactor for CappedLinearFactor {
    fn factor(&self, gap: f64) -> f64 {
        (1.0 + gap.max(0.0) / self.gap_scale).min(self.max_factor)
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "capped_linear",
            "gap_scale": self.gap_scale,
            "max_factor": self.max_factor
        })
    }
}

/// Working ratings of the four participants at match time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamRatings {
    pub team_a: [f64; 2],
    pub team_b: [f64; 2],
}

impl TeamRatings {
    pub fn sum(&self, side: Side) -> f64 {
        match side {
            Side::A => self.team_a[0] + self.team_a[1],
            Side::B => self.team_b[0] + self.team_b[1],
        }
    }
}

/// Rating transfer computed for one decisive match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsAward {
    pub winner: Side,
    pub base: f64,
    pub game_differential: f64,
    pub gap: f64,
    pub factor: f64,
    pub points: f64,
    pub delta_a: f64,
    pub delta_b: f64,
    pub trace: String,
}

/// Points formula with a configurable normalisation divisor and factor policy
#[derive(Debug, Clone)]
pub struct PointsFormula {
    normalization_divisor: f64,
    factor: Arc<dyn UnderdogFactor>,
}

impl Default for PointsFormula {
    fn default() -> Self {
        Self {
            normalization_divisor: DEFAULT_NORMALIZATION_DIVISOR,
            factor: Arc::new(CappedLinearFactor::default()),
        }
    }
}

impl PointsFormula {
    pub fn new(normalization_divisor: f64, factor: Arc<dyn UnderdogFactor>) -> Result<Self> {
        if !normalization_divisor.is_finite() || normalization_divisor <= 0.0 {
            return Err(LeagueError::ConfigurationError {
                message: format!(
                    "Normalization divisor must be positive, got {}",
                    normalization_divisor
                ),
            }
            .into());
        }

        Ok(Self {
            normalization_divisor,
            factor,
        })
    }

    pub fn normalization_divisor(&self) -> f64 {
        self.normalization_divisor
    }

    pub fn factor_policy(&self) -> &dyn UnderdogFactor {
        self.factor.as_ref()
    }

    /// Compute the transfer for a match. Returns `None` when the outcome has
    /// no winner; such matches must never be scored.
    pub fn compute(&self, ratings: &TeamRatings, outcome: &Outcome) -> Option<PointsAward> {
        let winner = outcome.winner?;
        let (winner_games, loser_games) = outcome.winner_games()?;

        let sum_winner = ratings.sum(winner);
        let sum_loser = ratings.sum(winner.opponent());

        let base = (sum_winner + sum_loser) / self.normalization_divisor;
        let game_differential = f64::from(winner_games) - f64::from(loser_games);
        let gap = sum_loser - sum_winner;
        let factor = self.factor.factor(gap);
        let points = ((base + game_differential) * factor).round();

        let (delta_a, delta_b) = match winner {
            Side::A => (points, -points),
            Side::B => (-points, points),
        };

        let trace = format!(
            "base=({:.0}+{:.0})/{}={:.2} | GD={}-{}={} | gap={:.0}-{:.0}={:.0} | factor={:.3} | P=round(({:.2}+{})*{:.3})={}",
            sum_winner,
            sum_loser,
            self.normalization_divisor,
            base,
            winner_games,
            loser_games,
            game_differential,
            sum_loser,
            sum_winner,
            gap,
            factor,
            base,
            game_differential,
            factor,
            points
        );

        Some(PointsAward {
            winner,
            base,
            game_differential,
            gap,
            factor,
            points,
            delta_a,
            delta_b,
            trace,
        })
    }
}
