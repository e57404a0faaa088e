//! Strictly Tic-Tac-Toe - Unified CLI
//!
//! Terminal game plus maintenance commands for the stored scores and history.

#![warn(missing_docs)]

mod cli;
mod tui;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use cli::{Cli, Command};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use strictly_tictactoe::{AppConfig, GameSession, MoveSelector, SqliteStore};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(db_path) = cli.db_path {
        config = config.with_db_path(db_path);
    }

    match cli.command {
        Command::Play {
            mode,
            ai_delay_ms,
            seed,
        } => {
            if let Some(mode) = mode {
                config = config.with_default_mode(mode.into());
            }
            if let Some(ms) = ai_delay_ms {
                config = config.with_ai_delay_ms(ms);
            }
            if let Some(seed) = seed {
                config = config.with_ai_seed(seed);
            }
            run_play(config)
        }
        Command::Stats => {
            init_stderr_logging()?;
            run_stats(&config)
        }
        Command::ResetScores => {
            init_stderr_logging()?;
            run_reset_scores(&config)
        }
        Command::ClearHistory => {
            init_stderr_logging()?;
            run_clear_history(&config)
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_stderr_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialise logging: {}", e))
}

/// Setup logging to file to avoid interfering with TUI
fn init_file_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialise logging to {}: {}", path.display(), e))
}

fn open_store(config: &AppConfig) -> Result<SqliteStore> {
    SqliteStore::open(config.db_path())
        .with_context(|| format!("Failed to open database {}", config.db_path()))
}

/// Run the terminal game
#[instrument(skip_all)]
fn run_play(config: AppConfig) -> Result<()> {
    init_file_logging(Path::new(config.log_file()))?;
    info!(?config, "Starting game");

    let store = open_store(&config)?;
    let rng = match config.ai_seed() {
        Some(seed) => ChaCha8Rng::seed_from_u64(*seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let session = GameSession::new(store, MoveSelector::new(rng)).with_mode(*config.default_mode());

    tui::run_tui(session, Duration::from_millis(*config.ai_delay_ms()))
}

/// Print the score tally and history aggregates
#[instrument(skip_all)]
fn run_stats(config: &AppConfig) -> Result<()> {
    let store = open_store(config)?;
    let scores = *strictly_tictactoe::ScoreTracker::load(store.clone()).tally();
    let stats = strictly_tictactoe::AnalyticsRecorder::load(store).stats();

    println!("Scores");
    println!("  X wins: {}", scores.x_wins());
    println!("  O wins: {}", scores.o_wins());
    println!("  Draws:  {}", scores.draws());
    println!();
    println!("History");
    println!("  Games played:      {}", stats.total_games());
    println!("  X / O / draw:      {} / {} / {}", stats.x_wins(), stats.o_wins(), stats.draws());
    println!("  Average duration:  {:.1} s", stats.average_duration_ms() / 1000.0);
    println!("  Average moves:     {:.1}", stats.average_moves());
    Ok(())
}

/// Zero the stored score tally
#[instrument(skip_all)]
fn run_reset_scores(config: &AppConfig) -> Result<()> {
    let store = open_store(config)?;
    strictly_tictactoe::ScoreTracker::load(store).reset();
    println!("Scores reset.");
    Ok(())
}

/// Delete the stored game history
#[instrument(skip_all)]
fn run_clear_history(config: &AppConfig) -> Result<()> {
    let store = open_store(config)?;
    strictly_tictactoe::AnalyticsRecorder::load(store).clear();
    println!("History cleared.");
    Ok(())
}
