//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::StudyBuddyError;
use crate::focus::SessionType;

/// How long to wait for input before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start or resume the timer.
    Start,
    /// Pause or resume the timer.
    TogglePause,
    /// Rewind the current session.
    Reset,
    /// Select a session type.
    Switch(SessionType),
    /// Next longer focus length.
    Longer,
    /// Next shorter focus length.
    Shorter,
    /// Show or hide the key help.
    Help,
}

/// Map a key press to an action.
#[must_use]
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ' | 's') => Some(Action::Start),
        KeyCode::Char('p') => Some(Action::TogglePause),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('1') => Some(Action::Switch(SessionType::Focus)),
        KeyCode::Char('2') => Some(Action::Switch(SessionType::ShortBreak)),
        KeyCode::Char('3') => Some(Action::Switch(SessionType::LongBreak)),
        KeyCode::Char('+' | '=') => Some(Action::Longer),
        KeyCode::Char('-' | '_') => Some(Action::Shorter),
        KeyCode::Char('?') => Some(Action::Help),
        _ => None,
    }
}

/// Handle terminal events.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events() -> Result<Option<Action>, StudyBuddyError> {
    if !event::poll(POLL_INTERVAL)
        .map_err(|e| StudyBuddyError::Terminal(format!("Event poll failed: {e}")))?
    {
        return Ok(None);
    }

    match event::read().map_err(|e| StudyBuddyError::Terminal(format!("Event read failed: {e}")))? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(action_for_key(key)),
        _ => Ok(None),
    }
}
