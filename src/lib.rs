//! Court League - rating and leaderboard engine for a doubles league
//!
//! This crate replays a log of doubles matches into player ratings and
//! records, and derives the league leaderboards from the replay.

pub mod analytics;
pub mod config;
pub mod error;
pub mod league;
pub mod rating;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{LeagueError, Result};
pub use types::*;

// Re-export key components
pub use analytics::LeagueReport;
pub use league::{LeagueCoordinator, MatchDraft, StateOrigin};
pub use rating::{evaluate_outcome, recompute, RatingEngine, ReplayOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
