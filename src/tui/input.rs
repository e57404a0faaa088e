//! Keyboard mapping and cursor movement.

use crossterm::event::KeyCode;
use strictly_tictactoe::{GameMode, Position};

/// Something the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Play a specific cell.
    Place(Position),
    /// Play the cell under the cursor.
    PlaceAtCursor,
    /// Move the cursor with an arrow key.
    MoveCursor(KeyCode),
    /// Switch to a mode (starts a new game).
    SetMode(GameMode),
    /// Flip between the two modes (starts a new game).
    ToggleMode,
    /// Start a new game.
    ResetGame,
    /// Zero the scores.
    ResetScores,
    /// Close the game-over modal.
    DismissModal,
    /// Close the modal and start a new game.
    PlayAgain,
    /// Leave the application.
    Quit,
}

/// Maps a key press to an action.
///
/// While the game-over modal is open only the modal keys and quit respond.
pub fn map_key(key: KeyCode, modal_open: bool) -> Option<Action> {
    if modal_open {
        return match key {
            KeyCode::Esc => Some(Action::DismissModal),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::PlayAgain),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        };
    }

    match key {
        KeyCode::Char(c @ '1'..='9') => Position::from_digit(c).map(Action::Place),
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => Some(Action::MoveCursor(key)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::PlaceAtCursor),
        KeyCode::Char('m') => Some(Action::ToggleMode),
        KeyCode::Char('p') => Some(Action::SetMode(GameMode::PlayerVsPlayer)),
        KeyCode::Char('a') => Some(Action::SetMode(GameMode::PlayerVsAi)),
        KeyCode::Char('r') => Some(Action::ResetGame),
        KeyCode::Char('s') => Some(Action::ResetScores),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

/// Moves cursor based on arrow keys.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let index = cursor.to_index();
    let (row, col) = (index / 3, index % 3);

    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };

    Position::from_index(row * 3 + col).unwrap_or(cursor)
}
