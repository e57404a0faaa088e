//! Heuristic move selection for the computer opponent.
//!
//! The policy looks one ply ahead and no further: take a winning square,
//! otherwise block the opponent's winning square, otherwise prefer the
//! center, a corner, then an edge. It does not see forks or double threats.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

use super::{Board, Player, Position};

/// Priority level that produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Tier {
    /// Completes one of our lines.
    Win,
    /// Stops the opponent completing a line.
    Block,
    /// The center square.
    Center,
    /// A random free corner.
    Corner,
    /// A random free edge.
    Edge,
    /// Any free square.
    Fallback,
}

/// Picks moves for the AI using a fixed priority list.
///
/// Tiers 1 and 2 are deterministic (lowest index wins). Corners, edges and
/// the fallback draw from the injected random source.
#[derive(Debug, Clone)]
pub struct MoveSelector<R> {
    rng: R,
}

impl<R: Rng> MoveSelector<R> {
    /// Creates a selector over the given random source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Chooses a square for `ai`, or `None` if the board is full.
    #[instrument(skip(self, board), fields(board = %board.display()))]
    pub fn select(&mut self, board: &Board, ai: Player) -> Option<Position> {
        let (position, tier) = self.select_with_tier(board, ai)?;
        debug!(?position, %tier, "AI selected move");
        Some(position)
    }

    /// Like [`select`](Self::select), also reporting which tier decided.
    pub fn select_with_tier(&mut self, board: &Board, ai: Player) -> Option<(Position, Tier)> {
        let empty = board.empty_positions();
        if empty.is_empty() {
            return None;
        }

        if let Some(pos) = completing_move(board, &empty, ai) {
            return Some((pos, Tier::Win));
        }

        if let Some(pos) = completing_move(board, &empty, ai.opponent()) {
            return Some((pos, Tier::Block));
        }

        if board.is_empty(Position::Center) {
            return Some((Position::Center, Tier::Center));
        }

        let corners = free_of(board, &Position::CORNERS);
        if let Some(&pos) = corners.choose(&mut self.rng) {
            return Some((pos, Tier::Corner));
        }

        let edges = free_of(board, &Position::EDGES);
        if let Some(&pos) = edges.choose(&mut self.rng) {
            return Some((pos, Tier::Edge));
        }

        empty
            .choose(&mut self.rng)
            .map(|&pos| (pos, Tier::Fallback))
    }
}

/// First empty square (in index order) that wins the game for `player`.
fn completing_move(board: &Board, empty: &[Position], player: Player) -> Option<Position> {
    empty
        .iter()
        .copied()
        .find(|&pos| board.with_mark(pos, player).winner() == Some(player))
}

fn free_of(board: &Board, candidates: &[Position]) -> Vec<Position> {
    candidates
        .iter()
        .copied()
        .filter(|&pos| board.is_empty(pos))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn selector() -> MoveSelector<ChaCha8Rng> {
        MoveSelector::new(ChaCha8Rng::seed_from_u64(7))
    }

    #[test]
    fn test_full_board_yields_none() {
        let x = Some(Player::X);
        let o = Some(Player::O);
        let board = Board::from_marks([x, o, x, o, x, x, o, x, o]);
        assert_eq!(selector().select(&board, Player::O), None);
    }

    #[test]
    fn test_win_preferred_over_block() {
        // O can win on the middle row; X threatens the top row.
        let x = Some(Player::X);
        let o = Some(Player::O);
        let board = Board::from_marks([x, x, None, o, o, None, x, None, None]);
        assert_eq!(
            selector().select_with_tier(&board, Player::O),
            Some((Position::MiddleRight, Tier::Win))
        );
    }

    #[test]
    fn test_lowest_index_wins_among_blocks() {
        // X threatens both 2 (top row) and 6 (left column).
        let x = Some(Player::X);
        let o = Some(Player::O);
        let board = Board::from_marks([x, x, None, x, o, None, None, None, o]);
        assert_eq!(
            selector().select_with_tier(&board, Player::O),
            Some((Position::TopRight, Tier::Block))
        );
    }

    #[test]
    fn test_corner_when_center_taken() {
        let board = Board::from_marks([None, None, None, None, Some(Player::X), None, None, None, None]);
        let (pos, tier) = selector().select_with_tier(&board, Player::O).unwrap();
        assert_eq!(tier, Tier::Corner);
        assert!(Position::CORNERS.contains(&pos));
    }

    #[test]
    fn test_edge_when_corners_and_center_taken() {
        // X O X
        // _ X _
        // O X O
        let x = Some(Player::X);
        let o = Some(Player::O);
        let board = Board::from_marks([x, o, x, None, x, None, o, x, o]);
        let (pos, tier) = selector().select_with_tier(&board, Player::O).unwrap();
        assert_eq!(tier, Tier::Edge);
        assert!(pos == Position::MiddleLeft || pos == Position::MiddleRight);
    }

    #[test]
    fn test_same_seed_same_choices() {
        let board = Board::from_marks([None, None, None, None, Some(Player::X), None, None, None, None]);
        let mut a = MoveSelector::new(ChaCha8Rng::seed_from_u64(99));
        let mut b = MoveSelector::new(ChaCha8Rng::seed_from_u64(99));
        for _ in 0..16 {
            assert_eq!(a.select(&board, Player::O), b.select(&board, Player::O));
        }
    }
}
