//! Immutable league snapshots
//!
//! Each state transition produces a new snapshot carrying the source
//! document, the replay derived from it and the origin of the change.

use crate::rating::{RatingEngine, ReplayOutcome};
use crate::types::LeagueState;
use crate::utils::current_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a state transition came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateOrigin {
    /// Empty or preloaded state before any transition
    Initial,
    /// Edit made on this device; eligible for outbound sync
    Local,
    /// Snapshot received from the remote store; never echoed back
    RemoteApplied,
}

impl std::fmt::Display for StateOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateOrigin::Initial => write!(f, "initial"),
            StateOrigin::Local => write!(f, "local"),
            StateOrigin::RemoteApplied => write!(f, "remote-applied"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    /// Monotonic counter, incremented by every transition
    pub revision: u64,
    pub origin: StateOrigin,
    /// Source document; player ratings and records reflect `replay`
    pub state: LeagueState,
    pub replay: ReplayOutcome,
    pub updated_at: DateTime<Utc>,
}

impl LeagueSnapshot {
    /// Snapshot at revision 0
    pub fn initial(state: LeagueState, engine: &RatingEngine) -> Self {
        Self::build(0, StateOrigin::Initial, state, engine)
    }

    /// Successor snapshot for a new source document
    pub fn next(&self, state: LeagueState, origin: StateOrigin, engine: &RatingEngine) -> Self {
        Self::build(self.revision + 1, origin, state, engine)
    }

    fn build(revision: u64, origin: StateOrigin, mut state: LeagueState, engine: &RatingEngine) -> Self {
        let replay = engine.recompute(&state.players, &state.matches);
        state.players = replay.players.clone();

        Self {
            revision,
            origin,
            state,
            replay,
            updated_at: current_timestamp(),
        }
    }

    pub fn is_local(&self) -> bool {
        self.origin == StateOrigin::Local
    }
}
