//! Common types used throughout the league engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unique identifier for players
pub type PlayerId = String;

/// Unique identifier for matches
pub type MatchId = String;

/// Baseline rating assigned to every player before a replay
pub const DEFAULT_BASELINE_RATING: f64 = 1000.0;

/// Maximum number of sets in a best-of-three match
pub const MAX_SETS: usize = 3;

/// Highest game count accepted for one side of a set
pub const MAX_GAMES_PER_SET: u32 = 99;

/// One side of a doubles match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// The side on the other end of the court
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Result of a match from one player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    Win,
    Loss,
}

/// A registered league player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub rating: f64,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
}

impl Player {
    /// Create a player with the given rating and an empty record
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, rating: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rating,
            wins: 0,
            losses: 0,
        }
    }

    /// Total decisive matches recorded for this player
    pub fn matches_played(&self) -> u32 {
        self.wins + self.losses
    }
}

/// Games won by each side in a single set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Set {
    pub a: u32,
    pub b: u32,
}

impl Set {
    pub fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    /// A set with no games entered on either side
    pub fn is_empty(&self) -> bool {
        self.a == 0 && self.b == 0
    }
}

/// A stored doubles match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub date: DateTime<Utc>,
    pub team_a: [PlayerId; 2],
    pub team_b: [PlayerId; 2],
    #[serde(default)]
    pub sets: Vec<Set>,
}

impl Match {
    /// Players on the given side
    pub fn team(&self, side: Side) -> &[PlayerId; 2] {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    /// Which side a player was on, if they took part
    pub fn side_of(&self, player_id: &str) -> Option<Side> {
        if self.team_a.iter().any(|id| id == player_id) {
            Some(Side::A)
        } else if self.team_b.iter().any(|id| id == player_id) {
            Some(Side::B)
        } else {
            None
        }
    }

    /// All four participants, team A first
    pub fn participants(&self) -> impl Iterator<Item = &PlayerId> {
        self.team_a.iter().chain(self.team_b.iter())
    }
}

/// Persisted league document exchanged with the state layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueState {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub matches: Vec<Match>,
}

/// A match annotated with everything the replay computed for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedMatch {
    #[serde(flatten)]
    pub record: Match,
    pub sets_a: u32,
    pub sets_b: u32,
    pub games_a: u32,
    pub games_b: u32,
    pub winner: Option<Side>,
    /// Rating change applied to each player of team A
    pub delta_a: f64,
    /// Rating change applied to each player of team B
    pub delta_b: f64,
    pub points: f64,
    /// Human-readable derivation of `points`
    pub formula: String,
    /// Working rating of each known participant right after this match
    pub ratings_after: BTreeMap<PlayerId, f64>,
}

impl EnrichedMatch {
    /// Win or loss for a participant; `None` if they did not play or the match was undecided
    pub fn result_for(&self, player_id: &str) -> Option<MatchResult> {
        let side = self.record.side_of(player_id)?;
        let winner = self.winner?;
        if side == winner {
            Some(MatchResult::Win)
        } else {
            Some(MatchResult::Loss)
        }
    }

    /// Games (won, lost) from a participant's point of view
    pub fn games_for(&self, player_id: &str) -> Option<(u32, u32)> {
        match self.record.side_of(player_id)? {
            Side::A => Some((self.games_a, self.games_b)),
            Side::B => Some((self.games_b, self.games_a)),
        }
    }

    /// Rating delta applied to the given side
    pub fn delta_for(&self, side: Side) -> f64 {
        match side {
            Side::A => self.delta_a,
            Side::B => self.delta_b,
        }
    }

    pub fn is_decisive(&self) -> bool {
        self.winner.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_match() -> Match {
        Match {
            id: "m1".to_string(),
            date: Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap(),
            team_a: ["ana".to_string(), "bea".to_string()],
            team_b: ["carl".to_string(), "dani".to_string()],
            sets: vec![Set::new(6, 2), Set::new(6, 3)],
        }
    }

    #[test]
    fn test_side_of() {
        let m = sample_match();
        assert_eq!(m.side_of("ana"), Some(Side::A));
        assert_eq!(m.side_of("dani"), Some(Side::B));
        assert_eq!(m.side_of("eve"), None);
        assert_eq!(m.participants().count(), 4);
    }

    #[test]
    fn test_match_wire_format() {
        let json = r#"{
            "id": "m1",
            "date": "2024-05-01T18:00:00Z",
            "teamA": ["ana", "bea"],
            "teamB": ["carl", "dani"],
            "sets": [{"a": 6, "b": 2}, {"a": 6, "b": 3}]
        }"#;

        let parsed: Match = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, sample_match());
    }

    #[test]
    fn test_player_defaults_record() {
        let json = r#"{"id": "ana", "name": "Ana", "rating": 1010}"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.wins, 0);
        assert_eq!(player.losses, 0);
        assert_eq!(player.matches_played(), 0);
    }

    #[test]
    fn test_empty_set() {
        assert!(Set::default().is_empty());
        assert!(!Set::new(0, 6).is_empty());
    }
}
