//! Error types for studybuddy.

use thiserror::Error;

/// Errors that can occur while running studybuddy.
#[derive(Debug, Error)]
pub enum StudyBuddyError {
    /// Configuration could not be read, parsed or written.
    #[error("configuration error: {0}")]
    Config(String),

    /// The history database failed.
    #[error("database error: {0}")]
    Database(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value was outside the range the timer accepts.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A notification or audible cue could not be delivered.
    #[error("notification failed: {0}")]
    Notify(String),

    /// The terminal UI failed.
    #[error("terminal error: {0}")]
    Terminal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StudyBuddyError::InvalidInput("duration 20".to_string());
        assert_eq!(err.to_string(), "invalid input: duration 20");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: StudyBuddyError = io.into();
        assert!(matches!(err, StudyBuddyError::Io(_)));
    }
}
