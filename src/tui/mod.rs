//! Terminal UI for Strictly Tic-Tac-Toe

mod app;
mod input;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::Rng;
use ratatui::{Terminal, backend::CrosstermBackend};
use strictly_tictactoe::{GameSession, KeyValueStore};
use tracing::{error, info, instrument};

use app::App;

/// Runs the interactive game until the player quits.
#[instrument(skip_all, fields(ai_delay_ms = ai_delay.as_millis() as u64))]
pub fn run_tui<S: KeyValueStore, R: Rng>(session: GameSession<S, R>, ai_delay: Duration) -> Result<()> {
    info!("Starting Strictly Tic-Tac-Toe TUI");

    enable_raw_mode()?;
    // Restores the terminal on every exit path below, early `?` included.
    let _guard = TerminalGuard::new(restore_terminal);

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session, ai_delay);
    let res = run_loop(&mut terminal, &mut app);

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Runs `restore` when dropped.
struct TerminalGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> TerminalGuard<F> {
    fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut()> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

/// Leaves raw mode and the alternate screen and shows the cursor.
fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        error!(error = %e, "Failed to disable raw mode");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show) {
        error!(error = %e, "Failed to leave alternate screen");
    }
}

/// Draw, wait for a key or the AI deadline, repeat.
fn run_loop<S: KeyValueStore, R: Rng>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S, R>,
) -> Result<()> {
    loop {
        let view = app.view();
        terminal.draw(|f| ui::draw(f, &view, app.cursor(), app.modal(), app.status_message()))?;

        if app.should_quit() {
            return Ok(());
        }

        if event::poll(app.poll_timeout(Instant::now()))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(action) = input::map_key(key.code, app.modal().is_some())
        {
            app.handle(action, Instant::now());
        }

        app.tick(Instant::now());
    }
}
