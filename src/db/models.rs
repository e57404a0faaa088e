//! Persisted records and the aggregates derived from them.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::GameMode;
use crate::games::tictactoe::{GameStatus, Player};

/// Running win/draw counts.
///
/// Stored as `{"X": .., "O": .., "draw": ..}`. Missing fields read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ScoreTally {
    #[serde(rename = "X")]
    x_wins: u32,
    #[serde(rename = "O")]
    o_wins: u32,
    #[serde(rename = "draw")]
    draws: u32,
}

impl ScoreTally {
    /// Creates a tally with the given counts.
    pub fn new(x_wins: u32, o_wins: u32, draws: u32) -> Self {
        Self {
            x_wins,
            o_wins,
            draws,
        }
    }

    /// Counts one finished game. Returns `false` for an unfinished one.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: GameStatus) -> bool {
        match outcome {
            GameStatus::Won(Player::X) => self.x_wins = self.x_wins.saturating_add(1),
            GameStatus::Won(Player::O) => self.o_wins = self.o_wins.saturating_add(1),
            GameStatus::Draw => self.draws = self.draws.saturating_add(1),
            GameStatus::InProgress => return false,
        }
        true
    }

    /// Games counted so far. Counts saturate at `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.x_wins.saturating_add(self.o_wins).saturating_add(self.draws)
    }
}

/// Result of a finished game as written to the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// X completed a line.
    #[serde(rename = "X")]
    XWins,
    /// O completed a line.
    #[serde(rename = "O")]
    OWins,
    /// Board filled without a line.
    #[serde(rename = "draw")]
    Draw,
}

impl GameResult {
    /// Converts a terminal status; `None` while the game is in progress.
    #[instrument]
    pub fn from_status(status: GameStatus) -> Option<Self> {
        match status {
            GameStatus::Won(Player::X) => Some(Self::XWins),
            GameStatus::Won(Player::O) => Some(Self::OWins),
            GameStatus::Draw => Some(Self::Draw),
            GameStatus::InProgress => None,
        }
    }

    /// Short label (`X`, `O`, `draw`) matching the stored form.
    pub fn label(self) -> &'static str {
        match self {
            Self::XWins => "X",
            Self::OWins => "O",
            Self::Draw => "draw",
        }
    }
}

/// One finished game. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    timestamp: DateTime<Utc>,
    winner: GameResult,
    /// Cell indices in the order they were played.
    moves: Vec<usize>,
    game_mode: GameMode,
    /// Wall-clock length of the game in milliseconds.
    duration: u64,
    total_moves: usize,
}

/// Aggregates over the whole history.
#[derive(Debug, Clone, PartialEq, Default, Getters)]
pub struct AnalyticsStats {
    total_games: usize,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    average_duration_ms: f64,
    average_moves: f64,
}

impl AnalyticsStats {
    /// Computes the aggregates from scratch.
    #[instrument(skip(history), fields(games = history.len()))]
    pub fn from_history(history: &[GameRecord]) -> Self {
        let total_games = history.len();
        let count = |result: GameResult| history.iter().filter(|g| g.winner == result).count();

        let (average_duration_ms, average_moves) = if total_games == 0 {
            (0.0, 0.0)
        } else {
            // Stored values may sit near the integer maximum.
            let duration: f64 = history.iter().map(|g| g.duration as f64).sum();
            let moves: f64 = history.iter().map(|g| g.total_moves as f64).sum();
            (duration / total_games as f64, moves / total_games as f64)
        };

        Self {
            total_games,
            x_wins: count(GameResult::XWins),
            o_wins: count(GameResult::OWins),
            draws: count(GameResult::Draw),
            average_duration_ms,
            average_moves,
        }
    }
}
