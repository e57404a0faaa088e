//! Draw detection.

use super::super::{Board, Square};
use super::win::check_winner;

/// No empty square left.
pub fn is_full(board: &Board) -> bool {
    !board.squares().contains(&Square::Empty)
}

/// A full board with no winner.
///
/// A move that fills the last square and completes a line is a win, never a
/// draw.
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}
