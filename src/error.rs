//! Error types for the league engine
//!
//! The rating core is total and never fails; these errors belong to the
//! boundaries around it (match creation, roster edits, configuration, sync).

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific league scenarios
#[derive(Debug, thiserror::Error)]
pub enum LeagueError {
    #[error("Invalid match: {reason}")]
    InvalidMatch { reason: String },

    #[error("Player appears more than once in a match: {player_id}")]
    DuplicateParticipant { player_id: String },

    #[error("Match has no decisive winner")]
    UndecidedOutcome,

    #[error("Too many sets: {count} (at most 3 allowed)")]
    TooManySets { count: usize },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: String },

    #[error("Invalid player: {reason}")]
    InvalidPlayer { reason: String },

    #[error("Player already exists: {player_id}")]
    DuplicatePlayer { player_id: String },

    #[error("Match not found: {match_id}")]
    MatchNotFound { match_id: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("State sync failed: {message}")]
    SyncFailed { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}
