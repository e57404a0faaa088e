//! Tic-tac-toe: board, rules and the heuristic AI.

mod ai;
mod position;
pub mod rules;
mod types;

pub use ai::{MoveSelector, Tier};
pub use position::{Position, WIN_LINES, WinLine};
pub use types::{Board, GameStatus, InvalidMove, Player, Square};

/// The status doubles as the outcome of a finished game.
pub type Outcome = GameStatus;
