//! Output formatting for studybuddy.
//!
//! This module provides formatters for displaying sessions and timer events in
//! the formats selected with `--output`.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::StudyBuddyError;
use crate::focus::{CompletedSession, CompletionEvent};

pub use json::*;
pub use pretty::*;

/// Format completed sessions based on output format
///
/// # Errors
///
/// Returns `StudyBuddyError::Json` if JSON serialization fails.
pub fn format_sessions(
    sessions: &[CompletedSession],
    format: OutputFormat,
) -> Result<String, StudyBuddyError> {
    match format {
        OutputFormat::Pretty => Ok(format_sessions_pretty(sessions)),
        OutputFormat::Json => format_sessions_json(sessions),
    }
}

/// Format completion events based on output format
///
/// # Errors
///
/// Returns `StudyBuddyError::Json` if JSON serialization fails.
pub fn format_events(
    events: &[CompletionEvent],
    format: OutputFormat,
) -> Result<String, StudyBuddyError> {
    match format {
        OutputFormat::Pretty => Ok(format_events_pretty(events)),
        OutputFormat::Json => format_events_json(events),
    }
}
