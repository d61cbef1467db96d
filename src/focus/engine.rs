//! The focus timer state machine.
//!
//! [`FocusEngine`] owns the countdown, the Focus / Short Break / Long Break
//! rotation and the bookkeeping of completed sessions. It performs no I/O:
//! ticks come in through [`FocusEngine::tick`] and completions go out as
//! [`CompletionEvent`] values for observers to act on.
//!
//! Operations never fail. Requests that make no sense in the current state are
//! ignored, and the methods that can be ignored report whether they applied.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::session::{CompletedSession, FocusMinutes, SessionType};
use super::timer::{Timer, TimerState};

/// Every this many completed focus sessions earns a long break.
pub const LONG_BREAK_EVERY: u32 = 4;

/// Emitted once each time a running countdown reaches zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionEvent {
    /// The session that just ended
    pub completed: SessionType,
    /// The session now staged (not started)
    pub next: SessionType,
    /// Nominal length of the ended session
    pub duration_seconds: u32,
    /// When it ended
    pub completed_at: DateTime<Utc>,
    /// Focus sessions completed so far, including this one if it was a focus
    pub sessions_completed: u32,
}

/// Read-only view of the engine for display and JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerSnapshot {
    pub session_type: SessionType,
    pub state: TimerState,
    pub running: bool,
    pub paused: bool,
    pub remaining_seconds: u32,
    pub full_duration_seconds: u32,
    pub focus_minutes: FocusMinutes,
    pub sessions_completed_today: u32,
    pub cumulative_focus_seconds: u64,
    pub progress: f64,
    pub formatted_time: String,
    pub streak: u32,
}

/// Pomodoro-style focus timer.
#[derive(Debug, Clone)]
pub struct FocusEngine {
    session_type: SessionType,
    timer: Timer,
    focus_minutes: FocusMinutes,
    sessions_completed: u32,
    cumulative_focus_seconds: u64,
    /// Most recent first.
    history: VecDeque<CompletedSession>,
}

impl FocusEngine {
    /// Create an idle engine with a focus session staged.
    #[must_use]
    pub fn new(focus_minutes: FocusMinutes) -> Self {
        Self {
            session_type: SessionType::Focus,
            timer: Timer::new(focus_minutes.seconds()),
            focus_minutes,
            sessions_completed: 0,
            cumulative_focus_seconds: 0,
            history: VecDeque::new(),
        }
    }

    /// Start the countdown, or resume it if paused.
    ///
    /// Returns false if it was already counting down.
    pub fn start(&mut self) -> bool {
        let applied = self.timer.start();
        if applied {
            tracing::debug!(session = %self.session_type, remaining = self.remaining_seconds(), "timer started");
        }
        applied
    }

    /// Toggle pause on a started session.
    ///
    /// Returns false when idle.
    pub fn pause(&mut self) -> bool {
        let applied = self.timer.toggle_pause();
        if applied {
            tracing::debug!(state = %self.timer.state(), "pause toggled");
        }
        applied
    }

    /// Stop and rewind the current session to its full length.
    ///
    /// Nothing is recorded in the history.
    pub fn reset(&mut self) {
        self.timer.rearm(self.full_duration_seconds());
        tracing::debug!(session = %self.session_type, "timer reset");
    }

    /// Select a session type, stopping whatever was in progress.
    ///
    /// The abandoned session is not recorded.
    pub fn switch_session(&mut self, session_type: SessionType) {
        self.session_type = session_type;
        self.timer
            .rearm(session_type.duration_seconds(self.focus_minutes));
        tracing::debug!(session = %session_type, "session switched");
    }

    /// Change the focus length.
    ///
    /// Only applies while a focus session is selected and the timer has not
    /// been started; otherwise the request is ignored and false is returned.
    pub fn set_focus_duration(&mut self, minutes: FocusMinutes) -> bool {
        if self.session_type != SessionType::Focus || self.is_running() {
            tracing::debug!(%minutes, "focus duration change ignored");
            return false;
        }
        self.focus_minutes = minutes;
        self.timer.rearm(minutes.seconds());
        true
    }

    /// Advance the countdown by one second.
    ///
    /// Ticks while idle or paused are ignored. Returns the completion event if
    /// this tick finished the session.
    pub fn tick(&mut self) -> Option<CompletionEvent> {
        if self.timer.tick() {
            Some(self.complete())
        } else {
            None
        }
    }

    fn complete(&mut self) -> CompletionEvent {
        let completed = self.session_type;
        let duration_seconds = self.full_duration_seconds();
        let record = CompletedSession::now(completed, duration_seconds);
        let completed_at = record.completed_at;
        self.history.push_front(record);

        let next = if completed == SessionType::Focus {
            self.sessions_completed += 1;
            self.cumulative_focus_seconds += u64::from(duration_seconds);
            if self.sessions_completed % LONG_BREAK_EVERY == 0 {
                SessionType::LongBreak
            } else {
                SessionType::ShortBreak
            }
        } else {
            SessionType::Focus
        };

        self.session_type = next;
        self.timer.rearm(next.duration_seconds(self.focus_minutes));

        tracing::info!(
            completed = %completed,
            next = %next,
            sessions = self.sessions_completed,
            "session complete"
        );

        CompletionEvent {
            completed,
            next,
            duration_seconds,
            completed_at,
            sessions_completed: self.sessions_completed,
        }
    }

    /// Currently selected session type.
    #[must_use]
    pub const fn session_type(&self) -> SessionType {
        self.session_type
    }

    /// Idle, running or paused.
    #[must_use]
    pub const fn state(&self) -> TimerState {
        self.timer.state()
    }

    /// True once started, including while paused.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.timer.state() != TimerState::Idle
    }

    /// True while a started session is suspended.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.timer.state() == TimerState::Paused
    }

    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.timer.remaining_seconds()
    }

    #[must_use]
    pub const fn focus_minutes(&self) -> FocusMinutes {
        self.focus_minutes
    }

    /// Full length of the selected session type.
    #[must_use]
    pub const fn full_duration_seconds(&self) -> u32 {
        self.session_type.duration_seconds(self.focus_minutes)
    }

    /// Focus sessions completed since the engine was created.
    #[must_use]
    pub const fn sessions_completed(&self) -> u32 {
        self.sessions_completed
    }

    #[must_use]
    pub const fn cumulative_focus_seconds(&self) -> u64 {
        self.cumulative_focus_seconds
    }

    /// Completed sessions, most recent first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &CompletedSession> {
        self.history.iter()
    }

    /// Fraction of the current session elapsed, in `[0, 1]`.
    #[must_use]
    pub fn progress_fraction(&self) -> f64 {
        self.timer.progress()
    }

    /// Remaining time as `mm:ss`.
    #[must_use]
    pub fn formatted_time(&self) -> String {
        self.timer.format_remaining()
    }

    /// Which four-session cycle the user is in; zero before the first focus.
    #[must_use]
    pub const fn streak(&self) -> u32 {
        if self.sessions_completed > 0 {
            self.sessions_completed / LONG_BREAK_EVERY + 1
        } else {
            0
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            session_type: self.session_type,
            state: self.state(),
            running: self.is_running(),
            paused: self.is_paused(),
            remaining_seconds: self.remaining_seconds(),
            full_duration_seconds: self.full_duration_seconds(),
            focus_minutes: self.focus_minutes,
            sessions_completed_today: self.sessions_completed,
            cumulative_focus_seconds: self.cumulative_focus_seconds,
            progress: self.progress_fraction(),
            formatted_time: self.formatted_time(),
            streak: self.streak(),
        }
    }
}

impl Default for FocusEngine {
    fn default() -> Self {
        Self::new(FocusMinutes::DEFAULT)
    }
}
