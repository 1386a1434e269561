//! Match creation boundary
//!
//! Raw form input is normalised here before anything reaches the match log.
//! A match is only accepted with four distinct players, at most three sets,
//! plausible set scores and a decisive outcome. Whole documents received from
//! the remote store are held to the same rules.

use crate::error::{LeagueError, Result};
use crate::rating::outcome::{evaluate_outcome, Outcome};
use crate::types::{LeagueState, Match, PlayerId, Set, MAX_GAMES_PER_SET, MAX_SETS};
use crate::utils::{current_timestamp, generate_match_id};
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One set as typed into the form; values may be numbers, strings or missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetDraft {
    #[serde(default)]
    pub a: serde_json::Value,
    #[serde(default)]
    pub b: serde_json::Value,
}

impl SetDraft {
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    /// Normalised set, or `None` when neither side was filled in
    pub fn normalize(&self) -> Option<Set> {
        match (normalize_game_count(&self.a), normalize_game_count(&self.b)) {
            (None, None) => None,
            (a, b) => Some(Set::new(a.unwrap_or(0), b.unwrap_or(0))),
        }
    }
}

/// Unvalidated match as submitted by the creation form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDraft {
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub team_a: [Option<PlayerId>; 2],
    #[serde(default)]
    pub team_b: [Option<PlayerId>; 2],
    #[serde(default)]
    pub sets: Vec<SetDraft>,
}

impl MatchDraft {
    /// Draft with every slot filled and numeric scores
    pub fn new(team_a: [&str; 2], team_b: [&str; 2], sets: &[(u32, u32)]) -> Self {
        Self {
            date: None,
            team_a: team_a.map(|id| Some(id.to_string())),
            team_b: team_b.map(|id| Some(id.to_string())),
            sets: sets.iter().map(|&(a, b)| SetDraft::new(a, b)).collect(),
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}

/// A draft that passed validation, with its evaluated outcome
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedMatch {
    pub record: Match,
    pub outcome: Outcome,
}

/// Parse a game count from form input.
///
/// Missing or blank input yields `None`; anything present but malformed
/// (negative, fractional, non-numeric) counts as zero.
pub fn normalize_game_count(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.trim().is_empty() => None,
        serde_json::Value::String(s) => Some(s.trim().parse::<u32>().unwrap_or(0)),
        serde_json::Value::Number(n) => Some(
            n.as_u64()
                .and_then(|games| u32::try_from(games).ok())
                .unwrap_or(0),
        ),
        _ => Some(0),
    }
}

fn team_ids(slots: &[Option<PlayerId>; 2], label: &str) -> Result<[PlayerId; 2]> {
    let mut ids: [PlayerId; 2] = Default::default();
    for (slot, id) in slots.iter().zip(ids.iter_mut()) {
        match slot.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => *id = value.to_string(),
            _ => {
                return Err(LeagueError::InvalidMatch {
                    reason: format!("team {} needs two players", label),
                }
                .into())
            }
        }
    }
    Ok(ids)
}

fn check_participants(team_a: &[PlayerId; 2], team_b: &[PlayerId; 2]) -> Result<()> {
    let mut seen = HashSet::new();
    for id in team_a.iter().chain(team_b.iter()) {
        if id.trim().is_empty() {
            return Err(LeagueError::InvalidMatch {
                reason: "empty player id".to_string(),
            }
            .into());
        }
        if !seen.insert(id.as_str()) {
            return Err(LeagueError::DuplicateParticipant {
                player_id: id.clone(),
            }
            .into());
        }
    }
    Ok(())
}

/// Check set count and scores, returning the decisive outcome
fn check_sets(sets: &[Set]) -> Result<Outcome> {
    if sets.len() > MAX_SETS {
        return Err(LeagueError::TooManySets { count: sets.len() }.into());
    }

    if let Some((index, set)) = sets
        .iter()
        .enumerate()
        .find(|(_, set)| set.a > MAX_GAMES_PER_SET || set.b > MAX_GAMES_PER_SET)
    {
        return Err(LeagueError::InvalidMatch {
            reason: format!(
                "set {} score {}-{} exceeds {} games",
                index + 1,
                set.a,
                set.b,
                MAX_GAMES_PER_SET
            ),
        }
        .into());
    }

    let outcome = evaluate_outcome(sets);
    if !outcome.is_decisive() {
        return Err(LeagueError::UndecidedOutcome.into());
    }

    Ok(outcome)
}

/// Validate a draft and turn it into a storable match
pub fn validate_match(draft: &MatchDraft) -> Result<ValidatedMatch> {
    let team_a = team_ids(&draft.team_a, "A")?;
    let team_b = team_ids(&draft.team_b, "B")?;
    check_participants(&team_a, &team_b)?;

    let sets: Vec<Set> = draft.sets.iter().filter_map(SetDraft::normalize).collect();
    let outcome = check_sets(&sets)?;

    let record = Match {
        id: generate_match_id(),
        date: draft.date.unwrap_or_else(current_timestamp),
        team_a,
        team_b,
        sets,
    };

    Ok(ValidatedMatch { record, outcome })
}

/// Check a whole league document before it replaces the current state.
///
/// Player and match ids must be unique and every stored match must satisfy
/// the same rules as a newly created one. Matches may still reference
/// players missing from the roster.
pub fn validate_state(state: &LeagueState) -> Result<()> {
    let mut player_ids = HashSet::new();
    for player in &state.players {
        if player.id.trim().is_empty() {
            return Err(LeagueError::InvalidPlayer {
                reason: "empty player id".to_string(),
            }
            .into());
        }
        if !player_ids.insert(player.id.as_str()) {
            return Err(LeagueError::DuplicatePlayer {
                player_id: player.id.clone(),
            }
            .into());
        }
    }

    let mut match_ids = HashSet::new();
    for record in &state.matches {
        if !match_ids.insert(record.id.as_str()) {
            return Err(LeagueError::InvalidMatch {
                reason: format!("duplicate match id {}", record.id),
            }
            .into());
        }

        check_participants(&record.team_a, &record.team_b)
            .and_then(|_| check_sets(&record.sets))
            .with_context(|| format!("Stored match {} is invalid", record.id))?;
    }

    Ok(())
}
