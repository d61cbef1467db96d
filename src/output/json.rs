//! JSON output formatting for studybuddy.

use serde::Serialize;
use serde_json::json;

use crate::error::StudyBuddyError;
use crate::focus::{CompletedSession, CompletionEvent};

/// Format completed sessions as JSON
///
/// # Errors
///
/// Returns `StudyBuddyError::Json` if JSON serialization fails.
pub fn format_sessions_json(sessions: &[CompletedSession]) -> Result<String, StudyBuddyError> {
    let output = json!({
        "count": sessions.len(),
        "items": sessions
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format completion events as JSON
///
/// # Errors
///
/// Returns `StudyBuddyError::Json` if JSON serialization fails.
pub fn format_events_json(events: &[CompletionEvent]) -> Result<String, StudyBuddyError> {
    let output = json!({
        "completed": events.len(),
        "events": events
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `StudyBuddyError::Json` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, StudyBuddyError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::SessionType;
    use chrono::{TimeZone, Utc};

    fn make_session(session_type: SessionType, duration_seconds: u32) -> CompletedSession {
        CompletedSession {
            session_type,
            duration_seconds,
            completed_at: Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_format_sessions_json_empty_list() {
        let result = format_sessions_json(&[]).unwrap();

        assert!(result.contains("\"count\": 0"));
        assert!(result.contains("\"items\": []"));
    }

    #[test]
    fn test_format_sessions_json_fields() {
        let sessions = vec![
            make_session(SessionType::Focus, 1500),
            make_session(SessionType::LongBreak, 900),
        ];
        let result = format_sessions_json(&sessions).unwrap();

        assert!(result.contains("\"count\": 2"));
        assert!(result.contains("\"session_type\": \"focus\""));
        assert!(result.contains("\"session_type\": \"long_break\""));
        assert!(result.contains("\"duration_seconds\": 1500"));
        assert!(result.contains("2024-03-15T09:30:00"));
    }

    #[test]
    fn test_format_events_json() {
        let event = CompletionEvent {
            completed: SessionType::Focus,
            next: SessionType::ShortBreak,
            duration_seconds: 1500,
            completed_at: Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap(),
            sessions_completed: 1,
        };
        let result = format_events_json(&[event]).unwrap();

        assert!(result.contains("\"completed\": 1"));
        assert!(result.contains("\"next\": \"short_break\""));
        assert!(result.contains("\"sessions_completed\": 1"));
    }

    #[test]
    fn test_to_json_generic() {
        let result = to_json(&make_session(SessionType::ShortBreak, 300)).unwrap();
        assert!(result.contains("\"session_type\": \"short_break\""));
    }
}
