//! Countdown timer and time formatting.
//!
//! The countdown is driven by discrete one-second ticks rather than the wall
//! clock, so it never drifts relative to the tick source feeding it.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Not started, or stopped by a reset or session switch
    Idle,
    /// Counting down
    Running,
    /// Started but temporarily suspended
    Paused,
}

impl std::fmt::Display for TimerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Running"),
            Self::Paused => write!(f, "Paused"),
        }
    }
}

/// A countdown timer.
#[derive(Debug, Clone)]
pub struct Timer {
    /// Total duration in seconds
    total_seconds: u32,
    /// Remaining seconds
    remaining_seconds: u32,
    /// Current state
    state: TimerState,
}

impl Timer {
    /// Create an idle timer of the given length.
    #[must_use]
    pub const fn new(total_seconds: u32) -> Self {
        Self {
            total_seconds,
            remaining_seconds: total_seconds,
            state: TimerState::Idle,
        }
    }

    /// Start or resume the timer.
    ///
    /// Returns false if it was already running or has nothing left to count.
    pub fn start(&mut self) -> bool {
        if self.state == TimerState::Running || self.remaining_seconds == 0 {
            return false;
        }
        self.state = TimerState::Running;
        true
    }

    /// Toggle between running and paused.
    ///
    /// Returns false when idle, since there is nothing to pause.
    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                true
            }
            TimerState::Paused => {
                self.state = TimerState::Running;
                true
            }
            TimerState::Idle => false,
        }
    }

    /// Tick the timer by one second.
    ///
    /// Returns true if the timer just reached zero. The timer is left idle in
    /// that case.
    pub fn tick(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);

        if self.remaining_seconds == 0 {
            self.state = TimerState::Idle;
            true
        } else {
            false
        }
    }

    /// Stop and rewind to a new length.
    pub fn rearm(&mut self, total_seconds: u32) {
        self.total_seconds = total_seconds;
        self.remaining_seconds = total_seconds;
        self.state = TimerState::Idle;
    }

    /// Seconds left on the countdown.
    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Get progress as a fraction (0.0 - 1.0).
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.total_seconds == 0 {
            return 1.0;
        }
        f64::from(self.total_seconds - self.remaining_seconds) / f64::from(self.total_seconds)
    }

    /// Get the current state.
    #[must_use]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    /// Format remaining time as MM:SS.
    #[must_use]
    pub fn format_remaining(&self) -> String {
        format_mmss(self.remaining_seconds)
    }
}

/// Format a second count as MM:SS.
///
/// Minutes are not wrapped into hours, so 3600 seconds renders as `60:00`.
#[must_use]
pub fn format_mmss(seconds: u32) -> String {
    let minutes = seconds / 60;
    let seconds = seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format a duration as a human-readable string.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_minutes = d.num_minutes();

    if total_minutes < 1 {
        let seconds = d.num_seconds();
        return format!("{} second{}", seconds, if seconds == 1 { "" } else { "s" });
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        if minutes > 0 {
            format!(
                "{} hour{}, {} minute{}",
                hours,
                if hours == 1 { "" } else { "s" },
                minutes,
                if minutes == 1 { "" } else { "s" }
            )
        } else {
            format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
        }
    } else {
        format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    }
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
