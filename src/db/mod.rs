//! Persistence: key-value stores, score tallies and game history.

mod analytics;
mod error;
mod models;
mod schema; // Diesel generated schema - internal use only
mod scores;
mod store;

pub use analytics::{AnalyticsRecorder, HISTORY_KEY};
pub use error::{StoreError, StoreOp};
pub use models::{AnalyticsStats, GameRecord, GameResult, ScoreTally};
pub use scores::{SCORES_KEY, ScoreTracker};
pub use store::{KeyValueStore, MemoryStore, SqliteStore};
