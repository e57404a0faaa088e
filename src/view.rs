//! What the front end draws, computed from a session.
//!
//! Rendering only ever reads a [`SessionView`]; nothing visual flows back
//! into the game logic.

use derive_getters::Getters;
use rand::Rng;
use tracing::instrument;

use crate::GameMode;
use crate::db::{KeyValueStore, ScoreTally};
use crate::games::tictactoe::{GameStatus, Player, Position, Square};
use crate::session::GameSession;

/// One cell as drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    /// Mark in the cell, if any.
    pub mark: Option<Player>,
    /// Part of a completed line.
    pub winning: bool,
}

/// Modal shown when a game ends.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Notification {
    title: String,
    message: String,
}

/// Snapshot of everything the front end displays.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct SessionView {
    cells: [CellView; 9],
    turn_label: String,
    notification: Option<Notification>,
    mode: GameMode,
    scores: ScoreTally,
    #[getter(skip)]
    o_label: &'static str,
    awaiting_ai: bool,
}

impl SessionView {
    /// Builds the view for `session`.
    #[instrument(skip(session))]
    pub fn of<S: KeyValueStore, R: Rng>(session: &GameSession<S, R>) -> Self {
        let board = session.board();
        let winning: Vec<Position> = board.winning_lines().into_iter().flatten().collect();

        let cells = Position::ALL.map(|pos| CellView {
            mark: match board.get(pos) {
                Square::Empty => None,
                Square::Occupied(player) => Some(player),
            },
            winning: winning.contains(&pos),
        });

        Self {
            cells,
            turn_label: turn_label(session.mode(), session.current_player()),
            notification: notification(session.status()),
            mode: session.mode(),
            scores: *session.scores(),
            o_label: o_label(session.mode()),
            awaiting_ai: session.is_awaiting_ai(),
        }
    }

    /// Label for O's score column.
    pub fn o_label(&self) -> &'static str {
        self.o_label
    }

    /// The cell at `pos`.
    pub fn cell(&self, pos: Position) -> CellView {
        self.cells[pos.to_index()]
    }
}

/// Text for the whose-turn indicator.
pub fn turn_label(mode: GameMode, player: Player) -> String {
    match (mode, player) {
        (GameMode::PlayerVsAi, Player::X) => "Your Turn".to_string(),
        (GameMode::PlayerVsAi, Player::O) => "AI's Turn".to_string(),
        (GameMode::PlayerVsPlayer, player) => format!("Player {}'s Turn", player),
    }
}

/// Label for O's score column.
pub fn o_label(mode: GameMode) -> &'static str {
    match mode {
        GameMode::PlayerVsAi => "AI",
        GameMode::PlayerVsPlayer => "Player O",
    }
}

/// Game-over modal for a terminal status; `None` while in progress.
pub fn notification(status: GameStatus) -> Option<Notification> {
    let message = match status {
        GameStatus::InProgress => return None,
        GameStatus::Won(player) => format!("Player {} Wins!", player),
        GameStatus::Draw => "It's a Draw!".to_string(),
    };
    Some(Notification {
        title: "Game Over".to_string(),
        message,
    })
}
