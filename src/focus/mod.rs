//! Focus timer and session tracking.
//!
//! Provides the Pomodoro-style study timer:
//! - The focus / short break / long break state machine
//! - A cancellable one-second tick source
//! - Completion notifications and sound cues
//! - Session history and reports

pub mod driver;
pub mod engine;
pub mod notify;
pub mod report;
pub mod session;
pub mod storage;
pub mod ticker;
pub mod timer;

pub use driver::TimerDriver;
pub use engine::{CompletionEvent, FocusEngine, TimerSnapshot, LONG_BREAK_EVERY};
pub use notify::{
    CompletionObserver, CueSink, DesktopNotifier, LogNotifier, Notification, NotificationSink,
    SoundCue, TerminalBell,
};
pub use report::{FocusReport, ReportPeriod};
pub use session::{CompletedSession, FocusMinutes, SessionType, FOCUS_DURATION_CHOICES};
pub use storage::SessionStore;
pub use ticker::{Tick, Ticker, TICK_INTERVAL};
pub use timer::{format_duration, format_mmss, render_progress_bar, Timer, TimerState};
