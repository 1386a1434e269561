//! Test fixtures and recording implementations for integration testing

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use court_league::error::Result;
use court_league::league::SyncPublisher;
use court_league::types::{LeagueState, Match, Player, Set};
use std::sync::Mutex;

/// Builds league documents with one match per day
#[derive(Debug, Default)]
pub struct LeagueBuilder {
    players: Vec<Player>,
    matches: Vec<Match>,
}

impl LeagueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roster of players with the given ids, names upper-cased
    pub fn with_players(ids: &[&str]) -> Self {
        let mut builder = Self::new();
        for id in ids {
            builder = builder.player(id, 1000.0);
        }
        builder
    }

    pub fn player(mut self, id: &str, rating: f64) -> Self {
        self.players.push(Player::new(id, id.to_uppercase(), rating));
        self
    }

    /// Add a match dated one day after the previous one
    pub fn doubles(mut self, team_a: [&str; 2], team_b: [&str; 2], sets: &[(u32, u32)]) -> Self {
        let day = self.matches.len() as i64;
        self.matches.push(Match {
            id: format!("m{}", day + 1),
            date: league_start() + Duration::days(day),
            team_a: team_a.map(str::to_string),
            team_b: team_b.map(str::to_string),
            sets: sets.iter().map(|&(a, b)| Set::new(a, b)).collect(),
        });
        self
    }

    pub fn build(self) -> LeagueState {
        LeagueState {
            players: self.players,
            matches: self.matches,
        }
    }
}

pub fn league_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 8, 19, 0, 0).unwrap()
}

/// Sync publisher that keeps every published document
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<LeagueState>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<LeagueState> {
        self.published
            .lock()
            .map(|states| states.clone())
            .unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.published().len()
    }
}

#[async_trait]
impl SyncPublisher for RecordingPublisher {
    async fn publish_state(&self, state: LeagueState) -> Result<()> {
        if let Ok(mut states) = self.published.lock() {
            states.push(state);
        }
        Ok(())
    }
}
