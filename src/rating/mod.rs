//! Rating recomputation engine
//!
//! This module provides the set evaluator, the zero-sum points formula and
//! the full-replay engine that derives every player's rating from the log.

pub mod formula;
pub mod outcome;
pub mod replay;

// Re-export commonly used types
pub use formula::{CappedLinearFactor, FlatFactor, PointsAward, PointsFormula, TeamRatings, UnderdogFactor};
pub use outcome::{evaluate_outcome, Outcome};
pub use replay::{recompute, RatingEngine, ReplayOutcome};
