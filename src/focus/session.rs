//! Session types and completed-session records.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StudyBuddyError;

/// Focus durations the timer accepts, in minutes.
pub const FOCUS_DURATION_CHOICES: [u32; 5] = [15, 25, 30, 45, 60];

/// Short break length in seconds.
pub const SHORT_BREAK_SECONDS: u32 = 5 * 60;

/// Long break length in seconds.
pub const LONG_BREAK_SECONDS: u32 = 15 * 60;

/// Type of timer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    /// Work interval of configurable length
    Focus,
    /// Short break (5 minutes)
    ShortBreak,
    /// Long break (15 minutes)
    LongBreak,
}

impl SessionType {
    /// Fixed length of this session type, or `None` for Focus.
    #[must_use]
    pub const fn fixed_seconds(&self) -> Option<u32> {
        match self {
            Self::Focus => None,
            Self::ShortBreak => Some(SHORT_BREAK_SECONDS),
            Self::LongBreak => Some(LONG_BREAK_SECONDS),
        }
    }

    /// Full length of this session type given the configured focus duration.
    #[must_use]
    pub const fn duration_seconds(&self, focus: FocusMinutes) -> u32 {
        match self.fixed_seconds() {
            Some(seconds) => seconds,
            None => focus.seconds(),
        }
    }

    /// Parse session type from string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "focus" | "f" | "work" | "study" => Some(Self::Focus),
            "break" | "short" | "short-break" | "short_break" | "sb" => Some(Self::ShortBreak),
            "long" | "long-break" | "long_break" | "lb" => Some(Self::LongBreak),
            _ => None,
        }
    }

    /// Stable identifier used in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::ShortBreak => "short_break",
            Self::LongBreak => "long_break",
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Focus => "Focus Time",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    /// Check if this is a break type.
    #[must_use]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::ShortBreak | Self::LongBreak)
    }
}

impl std::fmt::Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A focus duration drawn from [`FOCUS_DURATION_CHOICES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FocusMinutes(u32);

impl FocusMinutes {
    /// The classic 25-minute Pomodoro.
    pub const DEFAULT: Self = Self(25);

    /// Minutes as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Length in seconds.
    #[must_use]
    pub const fn seconds(self) -> u32 {
        self.0 * 60
    }

    /// Next longer choice, staying put at the maximum.
    #[must_use]
    pub fn longer(self) -> Self {
        FOCUS_DURATION_CHOICES
            .iter()
            .copied()
            .find(|&m| m > self.0)
            .map_or(self, Self)
    }

    /// Next shorter choice, staying put at the minimum.
    #[must_use]
    pub fn shorter(self) -> Self {
        FOCUS_DURATION_CHOICES
            .iter()
            .rev()
            .copied()
            .find(|&m| m < self.0)
            .map_or(self, Self)
    }
}

impl Default for FocusMinutes {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for FocusMinutes {
    type Error = StudyBuddyError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        if FOCUS_DURATION_CHOICES.contains(&minutes) {
            Ok(Self(minutes))
        } else {
            Err(StudyBuddyError::InvalidInput(format!(
                "focus duration must be one of 15, 25, 30, 45 or 60 minutes, got {minutes}"
            )))
        }
    }
}

impl From<FocusMinutes> for u32 {
    fn from(minutes: FocusMinutes) -> Self {
        minutes.0
    }
}

impl std::str::FromStr for FocusMinutes {
    type Err = StudyBuddyError;

    /// Accepts "25" or "25m".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches(['m', 'M']);
        let minutes: u32 = trimmed
            .parse()
            .map_err(|_| StudyBuddyError::Parse(format!("not a duration in minutes: {s}")))?;
        Self::try_from(minutes)
    }
}

impl std::fmt::Display for FocusMinutes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}m", self.0)
    }
}

/// A finished session as recorded in the history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedSession {
    /// What kind of session ended
    pub session_type: SessionType,
    /// Its full nominal length
    pub duration_seconds: u32,
    /// When the countdown reached zero
    pub completed_at: DateTime<Utc>,
}

impl CompletedSession {
    /// Record a session of the given type and length completing now.
    #[must_use]
    pub fn now(session_type: SessionType, duration_seconds: u32) -> Self {
        Self {
            session_type,
            duration_seconds,
            completed_at: Utc::now(),
        }
    }

    /// Completion time in the local timezone.
    #[must_use]
    pub fn completed_at_local(&self) -> DateTime<Local> {
        self.completed_at.with_timezone(&Local)
    }

    /// Length rounded down to whole minutes.
    #[must_use]
    pub const fn duration_minutes(&self) -> u32 {
        self.duration_seconds / 60
    }
}
