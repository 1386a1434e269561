//! Command line entry point for the court-league engine
//!
//! Loads a league document, replays it from baseline and prints the
//! standings and leaderboards.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use court_league::analytics::LeagueReport;
use court_league::config::AppConfig;
use court_league::league::LeagueCoordinator;
use court_league::types::LeagueState;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Which part of the report to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportKind {
    All,
    Standings,
    Podium,
    Couples,
    Efficiency,
    Streaks,
    Hardest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Court League - doubles rating replay and leaderboards
#[derive(Parser)]
#[command(
    name = "court-league",
    version,
    about = "Replay a doubles match log into ratings and leaderboards",
    long_about = "Court League replays the full match log of a doubles league from the baseline \
                 rating, in chronological order, and derives standings, podium rating timelines, \
                 pair win rates, efficiency, streak and hardest-to-beat rankings."
)]
struct Args {
    /// League document (JSON) to replay
    #[arg(short, long, value_name = "FILE")]
    state: Option<PathBuf>,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Report section to print
    #[arg(short, long, value_enum, default_value_t = ReportKind::All)]
    report: ReportKind,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Number of players tracked by the podium timeline
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// Minimum matches for the efficiency and hardest-to-beat rankings
    #[arg(long, value_name = "N")]
    min_matches: Option<u32>,

    /// Write the recomputed league document to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without replaying")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment, file and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(top) = args.top {
        config.analytics.podium_size = top;
    }

    if let Some(min_matches) = args.min_matches {
        config.analytics.min_matches = min_matches;
    }

    court_league::config::validate_config(&config)?;
    Ok(config)
}

fn read_state(path: &Path) -> Result<LeagueState> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read league document {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid league document {}", path.display()))
}

fn write_state(path: &Path, state: &LeagueState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write league document {}", path.display()))
}

/// Display startup banner with configuration information
fn display_startup_banner(config: &AppConfig) {
    info!("🎾 Court League");
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!("   Baseline rating: {}", config.rating.baseline_rating);
    info!(
        "   Normalization divisor: {}",
        config.rating.normalization_divisor
    );
    info!("   Factor policy: {:?}", config.rating.factor);
    info!("   Podium size: {}", config.analytics.podium_size);
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

fn print_json(report: &LeagueReport, kind: ReportKind) -> Result<()> {
    let value = match kind {
        ReportKind::All => serde_json::to_value(report)?,
        ReportKind::Standings => serde_json::to_value(&report.standings)?,
        ReportKind::Podium => serde_json::to_value(&report.podium)?,
        ReportKind::Couples => serde_json::to_value(&report.couples)?,
        ReportKind::Efficiency => serde_json::to_value(&report.efficiency)?,
        ReportKind::Streaks => serde_json::to_value(&report.streaks)?,
        ReportKind::Hardest => serde_json::to_value(&report.hardest_to_beat)?,
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_text(report: &LeagueReport, kind: ReportKind) {
    let wants = |section: ReportKind| kind == ReportKind::All || kind == section;

    if wants(ReportKind::Standings) {
        println!("Standings");
        for (rank, player) in report.standings.iter().enumerate() {
            println!(
                "  {:>2}. {:<20} {:>7.0}  {}W {}L",
                rank + 1,
                player.name,
                player.rating,
                player.wins,
                player.losses
            );
        }
    }

    if wants(ReportKind::Podium) {
        println!("Podium timeline");
        for point in &report.podium.points {
            let ratings: Vec<String> = report
                .podium
                .tracked
                .iter()
                .map(|p| match point.ratings.get(&p.id).copied().flatten() {
                    Some(rating) => format!("{}={:.0}", p.name, rating),
                    None => format!("{}=-", p.name),
                })
                .collect();
            println!(
                "  {}  {}",
                point.date.format("%Y-%m-%d %H:%M"),
                ratings.join("  ")
            );
        }
    }

    if wants(ReportKind::Couples) {
        println!("Couples");
        for couple in &report.couples {
            println!(
                "  {:<32} {:>5.1}%  ({}/{})",
                format!("{} & {}", couple.names[0], couple.names[1]),
                couple.win_rate * 100.0,
                couple.wins,
                couple.matches
            );
        }
    }

    if wants(ReportKind::Efficiency) {
        println!("Efficiency");
        for entry in &report.efficiency {
            println!(
                "  {:<20} {:.3}  (win {:.1}%, games {:.1}%)",
                entry.name,
                entry.score,
                entry.win_rate * 100.0,
                entry.game_share * 100.0
            );
        }
    }

    if wants(ReportKind::Streaks) {
        println!("Streaks");
        for entry in &report.streaks {
            println!(
                "  {:<20} best {}  current {} ({:?})",
                entry.name, entry.best_win_streak, entry.current_streak, entry.streak_type
            );
        }
    }

    if wants(ReportKind::Hardest) {
        println!("Hardest to beat");
        for entry in &report.hardest_to_beat {
            println!(
                "  {:<20} {:>5.1}% lost  ({} matches)",
                entry.name,
                entry.loss_rate * 100.0,
                entry.matches_played
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_startup_banner(&config);

    if args.dry_run {
        info!("Dry run completed - configuration is valid");
        return Ok(());
    }

    let Some(state_path) = args.state.as_deref() else {
        error!("No league document given (use --state FILE)");
        std::process::exit(2);
    };

    let engine = config.rating.build_engine()?;
    let state = read_state(state_path)?;
    debug!(
        "Loaded {} players and {} matches from {}",
        state.players.len(),
        state.matches.len(),
        state_path.display()
    );

    let coordinator = LeagueCoordinator::new(engine, LeagueState::default());
    let snapshot = coordinator
        .apply_remote(state)
        .await
        .with_context(|| format!("Rejected league document {}", state_path.display()))?;
    let report = coordinator.report(&config.analytics);

    match args.format {
        OutputFormat::Json => print_json(&report, args.report)?,
        OutputFormat::Text => print_text(&report, args.report),
    }

    if let Some(output) = &args.output {
        write_state(output, &snapshot.state)?;
        info!("Wrote recomputed league document to {}", output.display());
    }

    Ok(())
}
