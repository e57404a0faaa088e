//! History of finished games.

use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::GameMode;
use crate::db::store::{KeyValueStore, load_json, save_json};
use crate::db::{AnalyticsStats, GameRecord, GameResult};

/// Storage key for the game history.
pub const HISTORY_KEY: &str = "ticTacToeHistory";

/// Append-only log of finished games.
#[derive(Debug, Clone)]
pub struct AnalyticsRecorder<S> {
    store: S,
    history: Vec<GameRecord>,
}

impl<S: KeyValueStore> AnalyticsRecorder<S> {
    /// Loads the stored history; absent or corrupt data starts empty.
    #[instrument(skip(store))]
    pub fn load(store: S) -> Self {
        let history: Vec<GameRecord> = load_json(&store, HISTORY_KEY);
        info!(games = history.len(), "History loaded");
        Self { store, history }
    }

    /// Recorded games, oldest first.
    pub fn history(&self) -> &[GameRecord] {
        &self.history
    }

    /// Appends a game and persists the whole history.
    #[instrument(skip(self, moves), fields(moves = moves.len()))]
    pub fn record(&mut self, result: GameResult, moves: Vec<usize>, mode: GameMode, duration_ms: u64) {
        let total_moves = moves.len();
        let record = GameRecord::new(Utc::now(), result, moves, mode, duration_ms, total_moves);
        self.history.push(record);
        save_json(&self.store, HISTORY_KEY, &self.history);
        info!(games = self.history.len(), winner = result.label(), "Game recorded");
    }

    /// Aggregates over the current history.
    pub fn stats(&self) -> AnalyticsStats {
        AnalyticsStats::from_history(&self.history)
    }

    /// Drops every record and removes the stored history.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.history.clear();
        if let Err(e) = self.store.remove(HISTORY_KEY) {
            warn!(error = %e, "Failed to remove stored history");
        }
        info!("History cleared");
    }
}
