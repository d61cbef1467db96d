//! Terminal User Interface (TUI) for studybuddy.
//!
//! Provides the interactive study timer. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::App;

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::config::{Config, Paths};
use crate::error::StudyBuddyError;
use crate::focus::TimerDriver;

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(config: &Config, paths: &Paths) -> Result<(), StudyBuddyError> {
    let driver = TimerDriver::from_config(&config.focus, paths)?;
    let mut app = App::new(driver);

    enable_raw_mode()
        .map_err(|e| StudyBuddyError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| StudyBuddyError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| StudyBuddyError::Terminal(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), StudyBuddyError> {
    loop {
        app.on_tick();

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| StudyBuddyError::Terminal(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::handle_events()? {
            match action {
                event::Action::Quit => break,
                event::Action::Start => app.start(),
                event::Action::TogglePause => app.toggle_pause(),
                event::Action::Reset => app.reset(),
                event::Action::Switch(session_type) => app.switch_session(session_type),
                event::Action::Longer => app.cycle_focus_length(true),
                event::Action::Shorter => app.cycle_focus_length(false),
                event::Action::Help => app.toggle_help(),
            }
        }
    }

    Ok(())
}
