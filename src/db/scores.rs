//! Win/draw tallies that outlive a single game.

use tracing::{debug, info, instrument};

use crate::db::ScoreTally;
use crate::db::store::{KeyValueStore, load_json, save_json};
use crate::games::tictactoe::Outcome;

/// Storage key for the score tally.
pub const SCORES_KEY: &str = "ticTacToeScores";

/// Keeps the score tally in step with its stored copy.
#[derive(Debug, Clone)]
pub struct ScoreTracker<S> {
    store: S,
    tally: ScoreTally,
}

impl<S: KeyValueStore> ScoreTracker<S> {
    /// Loads the stored tally; absent or corrupt data starts from zero.
    #[instrument(skip(store))]
    pub fn load(store: S) -> Self {
        let tally: ScoreTally = load_json(&store, SCORES_KEY);
        info!(
            x_wins = tally.x_wins(),
            o_wins = tally.o_wins(),
            draws = tally.draws(),
            "Scores loaded"
        );
        Self { store, tally }
    }

    /// Current counts.
    pub fn tally(&self) -> &ScoreTally {
        &self.tally
    }

    /// Counts a finished game and persists the tally.
    ///
    /// An in-progress outcome is ignored.
    #[instrument(skip(self))]
    pub fn record_outcome(&mut self, outcome: Outcome) {
        if !self.tally.record(outcome) {
            debug!("Outcome not terminal, nothing recorded");
            return;
        }
        save_json(&self.store, SCORES_KEY, &self.tally);
        info!(total = self.tally.total(), "Outcome recorded");
    }

    /// Zeroes every count and persists.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.tally = ScoreTally::default();
        save_json(&self.store, SCORES_KEY, &self.tally);
        info!("Scores reset");
    }
}
