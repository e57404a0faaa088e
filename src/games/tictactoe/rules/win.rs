//! Win detection logic for tic-tac-toe.

use super::super::position::{WIN_LINES, WinLine};
use super::super::{Board, Player, Square};

/// The player owning a line, if all three squares hold that player's mark.
fn line_owner(board: &Board, [a, b, c]: WinLine) -> Option<Player> {
    let sq = board.get(a);
    match sq {
        Square::Occupied(player) if sq == board.get(b) && sq == board.get(c) => Some(player),
        _ => None,
    }
}

/// Checks if there is a winner on the board.
///
/// Lines are scanned rows first, then columns, then diagonals; the owner of
/// the first complete line is returned. A board reachable by legal play has
/// at most one winner, so the order only matters for malformed boards.
pub fn check_winner(board: &Board) -> Option<Player> {
    WIN_LINES.iter().find_map(|&line| line_owner(board, line))
}

/// Returns every complete line on the board, in scan order.
///
/// More than one line can complete on the same move (e.g. the last mark of
/// a row and a diagonal), so all of them are reported for highlighting.
pub fn winning_lines(board: &Board) -> Vec<WinLine> {
    WIN_LINES
        .iter()
        .copied()
        .filter(|&line| line_owner(board, line).is_some())
        .collect()
}
