//! League state coordinator
//!
//! Owns the current [`LeagueSnapshot`]. Every mutation, local or remote,
//! builds a new document, replays it from scratch and publishes the result
//! to subscribers.

use crate::analytics::LeagueReport;
use crate::config::AnalyticsSettings;
use crate::error::{LeagueError, Result};
use crate::league::state::{LeagueSnapshot, StateOrigin};
use crate::league::validation::{validate_match, validate_state, MatchDraft};
use crate::rating::RatingEngine;
use crate::types::{EnrichedMatch, LeagueState, Player};
use crate::utils::generate_player_id;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

pub struct LeagueCoordinator {
    engine: RatingEngine,
    current: watch::Sender<Arc<LeagueSnapshot>>,
    /// Serialises transitions so each one builds on the latest snapshot
    transition_lock: Mutex<()>,
}

impl LeagueCoordinator {
    /// Create a coordinator seeded with `state`
    pub fn new(engine: RatingEngine, state: LeagueState) -> Self {
        let initial = Arc::new(LeagueSnapshot::initial(state, &engine));
        let (current, _) = watch::channel(initial);

        Self {
            engine,
            current,
            transition_lock: Mutex::new(()),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<LeagueSnapshot> {
        self.current.borrow().clone()
    }

    /// Receive every subsequent snapshot
    pub fn subscribe(&self) -> watch::Receiver<Arc<LeagueSnapshot>> {
        self.current.subscribe()
    }

    pub fn engine(&self) -> &RatingEngine {
        &self.engine
    }

    async fn transition<F>(&self, origin: StateOrigin, edit: F) -> Result<Arc<LeagueSnapshot>>
    where
        F: FnOnce(&LeagueState) -> Result<LeagueState>,
    {
        let _guard = self.transition_lock.lock().await;

        let previous = self.snapshot();
        let state = edit(&previous.state)?;
        let next = Arc::new(previous.next(state, origin, &self.engine));

        info!(
            "League state revision {} applied ({}): {} players, {} matches",
            next.revision,
            origin,
            next.state.players.len(),
            next.state.matches.len()
        );

        self.current.send_replace(next.clone());
        Ok(next)
    }

    /// Register a new player at the baseline rating
    pub async fn add_player(&self, name: &str) -> Result<Player> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LeagueError::InvalidPlayer {
                reason: "name cannot be empty".to_string(),
            }
            .into());
        }

        let player = Player::new(generate_player_id(), name, self.engine.baseline_rating());
        self.insert_player(player).await
    }

    /// Register a player with a caller-chosen id
    pub async fn insert_player(&self, player: Player) -> Result<Player> {
        let player_id = player.id.clone();

        let snapshot = self
            .transition(StateOrigin::Local, |state| {
                if state.players.iter().any(|p| p.id == player.id) {
                    return Err(LeagueError::DuplicatePlayer {
                        player_id: player.id.clone(),
                    }
                    .into());
                }
                let mut next = state.clone();
                next.players.push(player);
                Ok(next)
            })
            .await?;

        snapshot
            .replay
            .player(&player_id)
            .cloned()
            .ok_or_else(|| {
                LeagueError::InternalError {
                    message: format!("Player {} missing after insert", player_id),
                }
                .into()
            })
    }

    /// Remove a player from the roster; their historical matches stay in the log
    pub async fn remove_player(&self, player_id: &str) -> Result<()> {
        self.transition(StateOrigin::Local, |state| {
            if !state.players.iter().any(|p| p.id == player_id) {
                return Err(LeagueError::PlayerNotFound {
                    player_id: player_id.to_string(),
                }
                .into());
            }
            let referenced = state
                .matches
                .iter()
                .filter(|m| m.side_of(player_id).is_some())
                .count();
            if referenced > 0 {
                warn!(
                    "Removing player '{}' still referenced by {} matches",
                    player_id, referenced
                );
            }

            let mut next = state.clone();
            next.players.retain(|p| p.id != player_id);
            Ok(next)
        })
        .await?;

        Ok(())
    }

    /// Validate and append a match, returning its replayed record
    pub async fn record_match(&self, draft: &MatchDraft) -> Result<EnrichedMatch> {
        let validated = validate_match(draft)?;
        let match_id = validated.record.id.clone();

        let snapshot = self
            .transition(StateOrigin::Local, |state| {
                if let Some(missing) = validated
                    .record
                    .participants()
                    .find(|id| !state.players.iter().any(|p| &p.id == *id))
                {
                    return Err(LeagueError::PlayerNotFound {
                        player_id: missing.clone(),
                    }
                    .into());
                }

                let mut next = state.clone();
                next.matches.push(validated.record);
                Ok(next)
            })
            .await?;

        debug!("Recorded match {}", match_id);

        snapshot
            .replay
            .matches
            .iter()
            .find(|m| m.record.id == match_id)
            .cloned()
            .ok_or_else(|| {
                LeagueError::InternalError {
                    message: format!("Match {} missing after insert", match_id),
                }
                .into()
            })
    }

    /// Delete a match outright and replay the remaining log
    pub async fn delete_match(&self, match_id: &str) -> Result<()> {
        self.transition(StateOrigin::Local, |state| {
            if !state.matches.iter().any(|m| m.id == match_id) {
                return Err(LeagueError::MatchNotFound {
                    match_id: match_id.to_string(),
                }
                .into());
            }
            let mut next = state.clone();
            next.matches.retain(|m| m.id != match_id);
            Ok(next)
        })
        .await?;

        Ok(())
    }

    /// Replace the whole state with a snapshot pushed by the remote store.
    ///
    /// A document failing [`validate_state`] is rejected and the current
    /// snapshot stays in place.
    pub async fn apply_remote(&self, state: LeagueState) -> Result<Arc<LeagueSnapshot>> {
        if let Err(e) = validate_state(&state) {
            warn!("Rejected remote league state: {:#}", e);
            return Err(e);
        }

        self.transition(StateOrigin::RemoteApplied, move |_| Ok(state))
            .await
    }

    /// Build every leaderboard for the current snapshot
    pub fn report(&self, settings: &AnalyticsSettings) -> LeagueReport {
        LeagueReport::build(&self.snapshot().replay, settings)
    }
}
