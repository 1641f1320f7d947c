//! Event handling for the focus screen.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::StudyNestError;

/// How long to wait for input before redrawing.
pub const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start or pause the timer.
    Toggle,
    /// Reset to a fresh work phase.
    Reset,
    /// Skip to the other phase.
    Skip,
    /// Mark the current task completed.
    CompleteTask,
    /// Show the key help.
    Help,
}

/// Poll for one terminal event.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_action() -> Result<Option<Action>, StudyNestError> {
    if !event::poll(POLL_TIMEOUT)
        .map_err(|e| StudyNestError::Terminal(format!("Event poll failed: {e}")))?
    {
        return Ok(None);
    }

    match event::read().map_err(|e| StudyNestError::Terminal(format!("Event read failed: {e}")))? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(key_action(key)),
        _ => Ok(None),
    }
}

/// Map a key press to an action.
#[must_use]
pub fn key_action(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Toggle),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('s') => Some(Action::Skip),
        KeyCode::Char('d') => Some(Action::CompleteTask),
        KeyCode::Char('?') => Some(Action::Help),
        _ => None,
    }
}
