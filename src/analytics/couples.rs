//! Pair (couple) win-rate ranking

use crate::types::{EnrichedMatch, MatchResult, Player, PlayerId, Side};
use crate::utils::{descending, ratio};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Record of two players who shared a side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoupleStats {
    /// Player ids in lexical order
    pub players: [PlayerId; 2],
    pub names: [String; 2],
    pub wins: u32,
    pub losses: u32,
    pub matches: u32,
    pub win_rate: f64,
}

/// Unordered pair key
fn couple_key(first: &str, second: &str) -> [PlayerId; 2] {
    if first <= second {
        [first.to_string(), second.to_string()]
    } else {
        [second.to_string(), first.to_string()]
    }
}

/// Rank every pair that has been teammates in a decisive match by win rate.
///
/// The side a pair played on is irrelevant and stored matches without a
/// winner are skipped. Equal win rates keep the order in which the pairs
/// first appear in `matches`.
pub fn couple_ranking(players: &[Player], matches: &[EnrichedMatch]) -> Vec<CoupleStats> {
    let names: HashMap<&str, &str> = players
        .iter()
        .map(|p| (p.id.as_str(), p.name.as_str()))
        .collect();
    let display = |id: &str| names.get(id).copied().unwrap_or(id).to_string();

    let mut couples: Vec<CoupleStats> = Vec::new();
    let mut index: HashMap<[PlayerId; 2], usize> = HashMap::new();

    for enriched in matches.iter().filter(|m| m.is_decisive()) {
        for side in [Side::A, Side::B] {
            let team = enriched.record.team(side);
            let key = couple_key(&team[0], &team[1]);

            let slot = *index.entry(key.clone()).or_insert_with(|| {
                couples.push(CoupleStats {
                    names: [display(&key[0]), display(&key[1])],
                    players: key.clone(),
                    wins: 0,
                    losses: 0,
                    matches: 0,
                    win_rate: 0.0,
                });
                couples.len() - 1
            });

            let couple = &mut couples[slot];
            couple.matches += 1;
            match enriched.result_for(&team[0]) {
                Some(MatchResult::Win) => couple.wins += 1,
                Some(MatchResult::Loss) => couple.losses += 1,
                None => {}
            }
        }
    }

    for couple in &mut couples {
        couple.win_rate = ratio(couple.wins, couple.matches);
    }

    couples.sort_by(|a, b| descending(a.win_rate, b.win_rate));
    couples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::recompute;
    use crate::types::{Match, Set};
    use chrono::{Duration, TimeZone, Utc};

    fn create_test_match(id: &str, day: i64, a: [&str; 2], b: [&str; 2], a_wins: bool) -> Match {
        let sets = if a_wins {
            vec![Set::new(6, 3), Set::new(6, 3)]
        } else {
            vec![Set::new(3, 6), Set::new(3, 6)]
        };
        Match {
            id: id.to_string(),
            date: Utc.with_ymd_and_hms(2024, 2, 1, 20, 0, 0).unwrap() + Duration::days(day),
            team_a: [a[0].to_string(), a[1].to_string()],
            team_b: [b[0].to_string(), b[1].to_string()],
            sets,
        }
    }

    fn roster() -> Vec<Player> {
        ["a", "b", "c", "d", "e"]
            .iter()
            .map(|id| Player::new(*id, id.to_uppercase(), 1000.0))
            .collect()
    }

    #[test]
    fn test_pair_on_either_side() {
        let matches = vec![
            create_test_match("m1", 0, ["a", "b"], ["c", "d"], true),
            create_test_match("m2", 1, ["c", "d"], ["b", "a"], true),
        ];
        let outcome = recompute(&roster(), &matches);
        let couples = couple_ranking(&outcome.players, &outcome.matches);

        let ab = couples
            .iter()
            .find(|c| c.players == ["a".to_string(), "b".to_string()])
            .unwrap();
        assert_eq!(ab.matches, 2);
        assert_eq!(ab.wins, 1);
        assert_eq!(ab.losses, 1);
        assert_eq!(ab.win_rate, 0.5);
        assert_eq!(ab.names, ["A".to_string(), "B".to_string()]);
        assert_eq!(couples.len(), 2);
    }

    #[test]
    fn test_ranking_order_and_ties() {
        let matches = vec![
            create_test_match("m1", 0, ["a", "b"], ["c", "d"], false),
            create_test_match("m2", 1, ["a", "e"], ["c", "b"], true),
        ];
        let outcome = recompute(&roster(), &matches);
        let couples = couple_ranking(&outcome.players, &outcome.matches);

        let order: Vec<[PlayerId; 2]> = couples.iter().map(|c| c.players.clone()).collect();
        assert_eq!(
            order,
            vec![
                ["c".to_string(), "d".to_string()],
                ["a".to_string(), "e".to_string()],
                ["a".to_string(), "b".to_string()],
                ["b".to_string(), "c".to_string()],
            ]
        );
    }

    #[test]
    fn test_undecided_and_unknown_players() {
        let mut undecided = create_test_match("m1", 0, ["a", "b"], ["c", "d"], true);
        undecided.sets = vec![Set::new(6, 3), Set::new(3, 6)];
        let ghost = create_test_match("m2", 1, ["a", "ghost"], ["c", "d"], true);

        let outcome = recompute(&roster(), &[undecided, ghost]);
        let couples = couple_ranking(&outcome.players, &outcome.matches);

        assert_eq!(couples.len(), 2);
        assert_eq!(couples[0].players, ["a".to_string(), "ghost".to_string()]);
        assert_eq!(couples[0].names, ["A".to_string(), "ghost".to_string()]);
    }
}
