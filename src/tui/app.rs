//! Application state and logic.

use std::time::{Duration, Instant};

use rand::Rng;
use strictly_tictactoe::{
    GameMode, GameSession, KeyValueStore, MoveOutcome, Notification, Position, SessionView,
};
use tracing::{debug, info, instrument};

use super::input::{Action, move_cursor};

/// Longest wait for input before redrawing.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Main application state.
pub struct App<S, R> {
    session: GameSession<S, R>,
    cursor: Position,
    modal: Option<Notification>,
    ai_delay: Duration,
    ai_deadline: Option<Instant>,
    status_message: String,
    should_quit: bool,
}

impl<S: KeyValueStore, R: Rng> App<S, R> {
    /// Creates a new application around `session`.
    pub fn new(session: GameSession<S, R>, ai_delay: Duration) -> Self {
        let status_message = format!("{} - press 1-9 to play", session.mode().name());
        Self {
            session,
            cursor: Position::Center,
            modal: None,
            ai_delay,
            ai_deadline: None,
            status_message,
            should_quit: false,
        }
    }

    /// Render-ready snapshot of the session.
    pub fn view(&self) -> SessionView {
        SessionView::of(&self.session)
    }

    /// The session being played.
    pub fn session(&self) -> &GameSession<S, R> {
        &self.session
    }

    /// Cell under the keyboard cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Open game-over modal, if any.
    pub fn modal(&self) -> Option<&Notification> {
        self.modal.as_ref()
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// True once the player asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// How long the event loop may block waiting for input.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.ai_deadline {
            Some(deadline) => deadline.saturating_duration_since(now).min(IDLE_POLL),
            None => IDLE_POLL,
        }
    }

    /// Applies a player action.
    #[instrument(skip(self, now))]
    pub fn handle(&mut self, action: Action, now: Instant) {
        match action {
            Action::Place(pos) => self.place(pos, now),
            Action::PlaceAtCursor => self.place(self.cursor, now),
            Action::MoveCursor(key) => self.cursor = move_cursor(self.cursor, key),
            Action::SetMode(mode) => self.set_mode(mode),
            Action::ToggleMode => self.set_mode(self.session.mode().toggle()),
            Action::ResetGame => self.restart(),
            Action::ResetScores => {
                self.session.reset_scores();
                self.status_message = "Scores reset.".to_string();
            }
            Action::DismissModal => self.modal = None,
            Action::PlayAgain => self.restart(),
            Action::Quit => {
                info!("User quit");
                self.should_quit = true;
            }
        }
    }

    /// Plays the scheduled AI move once its delay has elapsed.
    pub fn tick(&mut self, now: Instant) {
        let Some(deadline) = self.ai_deadline else {
            return;
        };
        if now < deadline {
            return;
        }
        self.ai_deadline = None;

        match self.session.resolve_ai_turn() {
            Ok(outcome) => self.after_move(outcome, now),
            Err(e) => debug!(error = %e, "Scheduled AI move dropped"),
        }
    }

    fn place(&mut self, pos: Position, now: Instant) {
        self.cursor = pos;
        match self.session.request_move(pos.to_index()) {
            Ok(outcome) => self.after_move(outcome, now),
            Err(e) => debug!(error = %e, "Move ignored"),
        }
    }

    fn after_move(&mut self, outcome: MoveOutcome, now: Instant) {
        self.status_message = format!("{} played {}", outcome.player(), outcome.position().label());

        if *outcome.ai_scheduled() {
            self.ai_deadline = Some(now + self.ai_delay);
        }

        if outcome.status().is_terminal() {
            self.modal = self.view().notification().clone();
        }
    }

    fn set_mode(&mut self, mode: GameMode) {
        self.session.set_mode(mode);
        self.clear_turn_state();
        self.status_message = format!("{} - new game", mode.name());
    }

    /// Restarts the game.
    fn restart(&mut self) {
        debug!("Restarting game");
        self.session.reset();
        self.clear_turn_state();
        self.status_message = "Game restarted.".to_string();
    }

    fn clear_turn_state(&mut self) {
        self.modal = None;
        self.ai_deadline = None;
    }
}
