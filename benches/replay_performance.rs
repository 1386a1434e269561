//! Performance benchmarks for full replays and leaderboard derivation

use chrono::{Duration, TimeZone, Utc};
use court_league::analytics::LeagueReport;
use court_league::config::AnalyticsSettings;
use court_league::rating::{evaluate_outcome, RatingEngine};
use court_league::types::{Match, Player, Set};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const SCORELINES: [&[(u32, u32)]; 4] = [
    &[(6, 2), (6, 3)],
    &[(4, 6), (6, 4), (7, 5)],
    &[(3, 6), (2, 6)],
    &[(7, 6), (4, 6), (3, 6)],
];

fn synthetic_league(player_count: usize, match_count: usize) -> (Vec<Player>, Vec<Match>) {
    let players: Vec<Player> = (0..player_count)
        .map(|i| Player::new(format!("p{}", i), format!("Player {}", i), 1000.0))
        .collect();

    let start = Utc.with_ymd_and_hms(2024, 1, 1, 18, 0, 0).unwrap();
    let matches = (0..match_count)
        .map(|i| {
            let id = |offset: usize| players[(i * 3 + offset) % player_count].id.clone();
            Match {
                id: format!("m{}", i),
                date: start + Duration::hours(i as i64),
                team_a: [id(0), id(1)],
                team_b: [id(2), id(3)],
                sets: SCORELINES[i % SCORELINES.len()]
                    .iter()
                    .map(|&(a, b)| Set::new(a, b))
                    .collect(),
            }
        })
        .collect();

    (players, matches)
}

fn bench_set_evaluation(c: &mut Criterion) {
    let sets: Vec<Set> = SCORELINES[3].iter().map(|&(a, b)| Set::new(a, b)).collect();

    c.bench_function("evaluate_outcome", |b| {
        b.iter(|| black_box(evaluate_outcome(black_box(&sets))))
    });
}

fn bench_full_replay(c: &mut Criterion) {
    let engine = RatingEngine::default();
    let mut group = c.benchmark_group("full_replay");

    for match_count in [100, 1_000, 5_000] {
        let (players, matches) = synthetic_league(24, match_count);
        group.bench_with_input(
            BenchmarkId::from_parameter(match_count),
            &match_count,
            |b, _| b.iter(|| black_box(engine.recompute(black_box(&players), black_box(&matches)))),
        );
    }

    group.finish();
}

fn bench_league_report(c: &mut Criterion) {
    let engine = RatingEngine::default();
    let settings = AnalyticsSettings::default();
    let (players, matches) = synthetic_league(24, 1_000);
    let replay = engine.recompute(&players, &matches);

    c.bench_function("league_report_1000_matches", |b| {
        b.iter(|| black_box(LeagueReport::build(black_box(&replay), &settings)))
    });
}

criterion_group!(
    benches,
    bench_set_evaluation,
    bench_full_replay,
    bench_league_report
);
criterion_main!(benches);
