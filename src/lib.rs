//! Strictly Tic-Tac-Toe - game engine, heuristic AI and persistent scores
//!
//! # Architecture
//!
//! - **Games**: board, win/draw rules and the [`MoveSelector`] AI
//! - **Session**: [`GameSession`] turn handling, modes and the AI turn lock
//! - **Db**: [`KeyValueStore`] backends, [`ScoreTracker`], [`AnalyticsRecorder`]
//! - **View**: [`SessionView`], the render-ready projection of a session
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use strictly_tictactoe::{GameMode, GameSession, MemoryStore, MoveSelector, Position};
//!
//! let selector = MoveSelector::new(ChaCha8Rng::seed_from_u64(0));
//! let mut session = GameSession::new(MemoryStore::new(), selector)
//!     .with_mode(GameMode::PlayerVsAi);
//!
//! let outcome = session.request_move(0).unwrap();
//! assert!(*outcome.ai_scheduled());
//!
//! let reply = session.resolve_ai_turn().unwrap();
//! assert_eq!(*reply.position(), Position::Center);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod games;
mod mode;
mod session;
mod view;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError};

// Crate-level exports - Persistence
pub use db::{
    AnalyticsRecorder, AnalyticsStats, GameRecord, GameResult, HISTORY_KEY, KeyValueStore,
    MemoryStore, SCORES_KEY, ScoreTally, ScoreTracker, SqliteStore, StoreError, StoreOp,
};

// Crate-level exports - Session
pub use mode::GameMode;
pub use session::{AI_PLAYER, GameSession, MoveOutcome};
pub use view::{CellView, Notification, SessionView};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, GameStatus, InvalidMove, MoveSelector, Outcome, Player, Position, Square, Tier,
    WIN_LINES, WinLine, rules,
};
