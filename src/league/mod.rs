//! League state layer
//!
//! Match-creation validation, immutable snapshots, the coordinator that
//! owns them and the outbound sync of local edits.

pub mod coordinator;
pub mod state;
pub mod sync;
pub mod validation;

// Re-export commonly used types
pub use coordinator::LeagueCoordinator;
pub use state::{LeagueSnapshot, StateOrigin};
pub use sync::{OutboundSync, SyncPublisher};
pub use validation::{
    normalize_game_count, validate_match, validate_state, MatchDraft, SetDraft, ValidatedMatch,
};
