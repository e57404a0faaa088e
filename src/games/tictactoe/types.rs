//! Core domain types for tic-tac-toe.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::position::{Position, WinLine};
use super::rules;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second, and the AI in player-vs-AI games).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

/// Why a move request was turned down.
///
/// Rejections are routine: the front end only offers legal moves, so callers
/// log these and carry on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum InvalidMove {
    /// Index outside 0-8.
    #[display("position {index} is off the board")]
    OutOfRange {
        /// The offending index.
        index: usize,
    },
    /// Target square already holds a mark.
    #[display("{position} is already occupied")]
    Occupied {
        /// The occupied square.
        position: Position,
    },
    /// The game has already been won or drawn.
    #[display("game is already over")]
    GameOver,
    /// Human input is locked while the AI turn is scheduled.
    #[display("waiting for the AI to move")]
    AwaitingAi,
    /// An AI move was requested but none is scheduled.
    #[display("no AI turn is pending")]
    NoAiTurnPending,
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Builds a board from a row-major layout, `None` meaning empty.
    ///
    /// Intended for setting up positions in tests and analysis; no legality
    /// checks are made.
    pub fn from_marks(marks: [Option<Player>; 9]) -> Self {
        Self {
            squares: marks.map(|m| m.map_or(Square::Empty, Square::Occupied)),
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Empty positions in index order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|&pos| self.is_empty(pos))
            .collect()
    }

    /// Places `player`'s mark at `index`.
    ///
    /// Writes exactly one square on success.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove::OutOfRange`] for an index outside 0-8 and
    /// [`InvalidMove::Occupied`] if the square already holds a mark.
    #[instrument(skip(self))]
    pub fn apply(&mut self, index: usize, player: Player) -> Result<Position, InvalidMove> {
        let position = Position::from_index(index).ok_or(InvalidMove::OutOfRange { index })?;
        if !self.is_empty(position) {
            return Err(InvalidMove::Occupied { position });
        }
        self.squares[index] = Square::Occupied(player);
        Ok(position)
    }

    /// Returns a copy of the board with `player` marked at `pos`.
    ///
    /// Used for one-ply lookahead; the square is overwritten unconditionally.
    pub(crate) fn with_mark(&self, pos: Position, player: Player) -> Self {
        let mut next = self.clone();
        next.squares[pos.to_index()] = Square::Occupied(player);
        next
    }

    /// The player owning a complete line, if any.
    pub fn winner(&self) -> Option<Player> {
        rules::check_winner(self)
    }

    /// Every line fully owned by one player.
    pub fn winning_lines(&self) -> Vec<WinLine> {
        rules::winning_lines(self)
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Full board with no winner.
    pub fn is_draw(&self) -> bool {
        rules::is_draw(self)
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty squares show their keypad digit (1-9).
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(player) => player.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Current status of the game.
///
/// Derived from the board after every accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Derives the status from a board.
    pub fn of(board: &Board) -> Self {
        if let Some(player) = board.winner() {
            Self::Won(player)
        } else if board.is_draw() {
            Self::Draw
        } else {
            Self::InProgress
        }
    }

    /// True for `Won` and `Draw`.
    pub fn is_terminal(self) -> bool {
        self != Self::InProgress
    }
}
