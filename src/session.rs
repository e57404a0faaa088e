//! The game session: turn order, terminal detection and the AI turn.

use std::time::Instant;

use derive_getters::Getters;
use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::GameMode;
use crate::db::{AnalyticsRecorder, GameResult, KeyValueStore, ScoreTally, ScoreTracker};
use crate::games::tictactoe::{Board, GameStatus, InvalidMove, MoveSelector, Player, Position};

/// Which mark the AI plays in [`GameMode::PlayerVsAi`].
pub const AI_PLAYER: Player = Player::O;

/// What an accepted move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct MoveOutcome {
    /// Who moved.
    player: Player,
    /// Where.
    position: Position,
    /// Status after the move.
    status: GameStatus,
    /// True when the move handed the turn to the AI.
    ai_scheduled: bool,
}

/// One game of tic-tac-toe plus the score and history it feeds.
///
/// Every change goes through [`request_move`](Self::request_move) (human
/// input) or [`resolve_ai_turn`](Self::resolve_ai_turn) (the scheduled AI
/// move). While an AI turn is pending, human moves are refused, so the board
/// the AI sees cannot change between scheduling and resolution.
#[derive(Debug)]
pub struct GameSession<S, R> {
    board: Board,
    current_player: Player,
    mode: GameMode,
    status: GameStatus,
    history: Vec<Position>,
    ai_pending: bool,
    started_at: Instant,
    selector: MoveSelector<R>,
    scores: ScoreTracker<S>,
    analytics: AnalyticsRecorder<S>,
}

impl<S: KeyValueStore, R: Rng> GameSession<S, R> {
    /// Creates a session in player-vs-player mode, loading scores and
    /// history from `store`.
    #[instrument(skip_all)]
    pub fn new(store: S, selector: MoveSelector<R>) -> Self {
        info!("Creating game session");
        Self {
            board: Board::new(),
            current_player: Player::X,
            mode: GameMode::default(),
            status: GameStatus::InProgress,
            history: Vec::new(),
            ai_pending: false,
            started_at: Instant::now(),
            selector,
            scores: ScoreTracker::load(store.clone()),
            analytics: AnalyticsRecorder::load(store),
        }
    }

    /// Builder-style mode selection.
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.set_mode(mode);
        self
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// True until a win or draw.
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    /// True while the AI owes a move and human input is locked.
    pub fn is_awaiting_ai(&self) -> bool {
        self.ai_pending
    }

    /// Positions played this game, in order.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Score tally across games.
    pub fn scores(&self) -> &ScoreTally {
        self.scores.tally()
    }

    /// Finished-game history.
    pub fn analytics(&self) -> &AnalyticsRecorder<S> {
        &self.analytics
    }

    /// Plays the current player's mark at `index` on behalf of a human.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove`] without changing anything when the game is
    /// over, the AI is due to move, or the square is off the board or taken.
    #[instrument(skip(self), fields(player = %self.current_player, mode = ?self.mode))]
    pub fn request_move(&mut self, index: usize) -> Result<MoveOutcome, InvalidMove> {
        if self.ai_pending {
            debug!("Human input locked during AI turn");
            return Err(InvalidMove::AwaitingAi);
        }
        self.apply(index)
    }

    /// Plays the pending AI move.
    ///
    /// The move is computed against the board as it stands now, which is the
    /// board at scheduling time because human input is locked meanwhile.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove::NoAiTurnPending`] if no AI turn is scheduled,
    /// e.g. because the game was reset after scheduling.
    #[instrument(skip(self))]
    pub fn resolve_ai_turn(&mut self) -> Result<MoveOutcome, InvalidMove> {
        if !self.ai_pending {
            debug!("No AI turn to resolve");
            return Err(InvalidMove::NoAiTurnPending);
        }
        self.ai_pending = false;

        let Some(position) = self.selector.select(&self.board, AI_PLAYER) else {
            warn!("AI turn scheduled on a full board");
            return Err(InvalidMove::GameOver);
        };
        self.apply(position.to_index())
    }

    fn apply(&mut self, index: usize) -> Result<MoveOutcome, InvalidMove> {
        if self.status.is_terminal() {
            debug!(status = ?self.status, "Move after game over");
            return Err(InvalidMove::GameOver);
        }

        let player = self.current_player;
        let position = self.board.apply(index, player).inspect_err(|e| {
            debug!(error = %e, "Move rejected");
        })?;
        self.history.push(position);
        self.status = GameStatus::of(&self.board);

        if self.status.is_terminal() {
            self.finish();
        } else {
            self.current_player = player.opponent();
            self.ai_pending = self.mode.has_ai() && self.current_player == AI_PLAYER;
        }

        info!(
            %player,
            %position,
            status = ?self.status,
            ai_scheduled = self.ai_pending,
            "Move applied"
        );

        Ok(MoveOutcome {
            player,
            position,
            status: self.status,
            ai_scheduled: self.ai_pending,
        })
    }

    /// Records a terminal outcome with the score tracker and history.
    fn finish(&mut self) {
        self.scores.record_outcome(self.status);
        if let Some(result) = GameResult::from_status(self.status) {
            let moves = self.history.iter().map(|p| p.to_index()).collect();
            let duration_ms = u64::try_from(self.started_at.elapsed().as_millis()).unwrap_or(u64::MAX);
            self.analytics.record(result, moves, self.mode, duration_ms);
        }
        info!(status = ?self.status, moves = self.history.len(), "Game over");
    }

    /// Starts a fresh game: empty board, X to move. Scores are kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.current_player = Player::X;
        self.status = GameStatus::InProgress;
        self.history.clear();
        self.ai_pending = false;
        self.started_at = Instant::now();
        info!("Game reset");
    }

    /// Switches mode and starts a fresh game.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.reset();
    }

    /// Zeroes the score tally.
    pub fn reset_scores(&mut self) {
        self.scores.reset();
    }

    /// Forgets every recorded game.
    pub fn clear_history(&mut self) {
        self.analytics.clear();
    }
}
