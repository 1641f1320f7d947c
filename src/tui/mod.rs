//! Full-screen focus timer.
//!
//! Shows the countdown, the current task and today's totals.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::App;

use std::io;
use std::time::Instant;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::core::Clock;
use crate::error::StudyNestError;
use crate::storage::KeyValueStore;

/// Run the focus screen until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal fails to initialize or draw, or if a
/// finished session cannot be recorded.
pub fn run<S: KeyValueStore + ?Sized>(store: &S, clock: &dyn Clock) -> Result<(), StudyNestError> {
    // Setup terminal
    enable_raw_mode()
        .map_err(|e| StudyNestError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| StudyNestError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| StudyNestError::Terminal(format!("Failed to create terminal: {e}")))?;

    let mut app = App::new(store, clock);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend, S: KeyValueStore + ?Sized>(
    terminal: &mut Terminal<B>,
    app: &mut App<'_, S>,
) -> Result<(), StudyNestError> {
    let mut last_frame = Instant::now();
    loop {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| StudyNestError::Terminal(format!("Failed to draw: {e}")))?;

        let action = event::poll_action()?;

        let now = Instant::now();
        app.advance(now.duration_since(last_frame))?;
        last_frame = now;

        if let Some(action) = action {
            match action {
                event::Action::Quit => break,
                event::Action::Toggle => app.toggle(),
                event::Action::Reset => app.reset(),
                event::Action::Skip => app.skip(),
                event::Action::CompleteTask => app.complete_current()?,
                event::Action::Help => app.status = Some(ui::HELP.to_string()),
            }
        }
    }

    Ok(())
}
