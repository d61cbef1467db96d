//! Application state for the TUI.

use crate::focus::{
    CompletedSession, CompletionEvent, FocusReport, Notification, ReportPeriod, SessionType,
    TimerDriver, TimerSnapshot,
};

/// Number of recent sessions shown on screen.
pub const RECENT_LIMIT: usize = 5;

/// Today's totals shown under the timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodayStats {
    pub sessions: u32,
    pub focus_minutes: u64,
    /// Day streak from recorded history; `None` when history is off.
    pub streak_days: Option<u32>,
}

/// Application state.
pub struct App {
    driver: TimerDriver,
    /// Most recent sessions, newest first.
    pub recent: Vec<CompletedSession>,
    /// Totals for today.
    pub today: TodayStats,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the help overlay is open.
    pub show_help: bool,
}

impl App {
    /// Create a new app around a driver.
    #[must_use]
    pub fn new(driver: TimerDriver) -> Self {
        let mut app = Self {
            driver,
            recent: Vec::new(),
            today: TodayStats::default(),
            status: Some("Press ? for help".to_string()),
            show_help: false,
        };
        app.refresh_stats();
        app
    }

    #[must_use]
    pub fn snapshot(&self) -> TimerSnapshot {
        self.driver.engine().snapshot()
    }

    pub fn start(&mut self) {
        let session = self.driver.engine().session_type();
        if self.driver.start() {
            self.status = Some(format!("{} started", session.display_name()));
        }
    }

    pub fn toggle_pause(&mut self) {
        if !self.driver.pause() {
            self.status = Some("Nothing to pause".to_string());
            return;
        }
        self.status = Some(if self.driver.engine().is_paused() {
            "Paused".to_string()
        } else {
            "Resumed".to_string()
        });
    }

    pub fn reset(&mut self) {
        self.driver.reset();
        self.status = Some("Timer reset".to_string());
    }

    pub fn switch_session(&mut self, session_type: SessionType) {
        self.driver.switch_session(session_type);
        self.status = Some(format!("Switched to {}", session_type.display_name()));
    }

    /// Step the focus length up (`longer`) or down.
    pub fn cycle_focus_length(&mut self, longer: bool) {
        let current = self.driver.engine().focus_minutes();
        let next = if longer {
            current.longer()
        } else {
            current.shorter()
        };

        if next == current {
            self.status = Some(format!("Focus length stays at {current}"));
        } else if self.driver.set_focus_duration(next) {
            self.status = Some(format!("Focus length set to {next}"));
        } else {
            self.status =
                Some("Focus length can only change while a focus session is idle".to_string());
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Apply pending ticks and react to any completions.
    pub fn on_tick(&mut self) {
        let events = self.driver.drain();
        if let Some(last) = events.last() {
            self.announce(last);
            self.refresh_stats();
        }
    }

    fn announce(&mut self, event: &CompletionEvent) {
        let notification = Notification::for_completion(event);
        self.status = Some(format!("{} Press space to begin.", notification.body));
    }

    /// Reload today's totals and the recent list.
    ///
    /// Uses the history database when there is one, and this run's sessions
    /// otherwise.
    fn refresh_stats(&mut self) {
        let Some(store) = self.driver.store() else {
            let engine = self.driver.engine();
            self.recent = engine.history().take(RECENT_LIMIT).cloned().collect();
            self.today = TodayStats {
                sessions: engine.sessions_completed(),
                focus_minutes: engine.cumulative_focus_seconds() / 60,
                streak_days: None,
            };
            return;
        };

        let loaded = store.recent(RECENT_LIMIT).and_then(|recent| {
            let today = FocusReport::generate(store, ReportPeriod::Today)?;
            Ok((recent, today))
        });

        match loaded {
            Ok((recent, today)) => {
                self.recent = recent;
                self.today = TodayStats {
                    sessions: today.focus_sessions,
                    focus_minutes: today.focus_minutes,
                    streak_days: Some(today.streak_days),
                };
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load session stats");
                self.status = Some(format!("Could not load history: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::{CompletionObserver, FocusEngine, FocusMinutes, SessionStore, TimerState};
    use crate::storage::Database;
    use std::time::Duration;

    fn idle_app() -> App {
        let driver = TimerDriver::new(FocusEngine::default(), CompletionObserver::new())
            .with_interval(Duration::from_secs(3600));
        App::new(driver)
    }

    #[test]
    fn test_start_pause_resume() {
        let mut app = idle_app();
        app.start();
        assert_eq!(app.snapshot().state, TimerState::Running);

        app.toggle_pause();
        assert_eq!(app.status.as_deref(), Some("Paused"));
        assert!(app.snapshot().paused);

        app.toggle_pause();
        assert_eq!(app.status.as_deref(), Some("Resumed"));
        assert_eq!(app.snapshot().state, TimerState::Running);
    }

    #[test]
    fn test_pause_when_idle_reports_nothing_to_pause() {
        let mut app = idle_app();
        app.toggle_pause();
        assert_eq!(app.status.as_deref(), Some("Nothing to pause"));
    }

    #[test]
    fn test_cycle_focus_length() {
        let mut app = idle_app();
        app.cycle_focus_length(true);
        assert_eq!(app.snapshot().focus_minutes, FocusMinutes::try_from(30).unwrap());
        assert_eq!(app.snapshot().remaining_seconds, 1800);

        app.start();
        app.cycle_focus_length(true);
        assert_eq!(app.snapshot().focus_minutes, FocusMinutes::try_from(30).unwrap());
        assert!(app.status.unwrap().contains("only change"));
    }

    #[test]
    fn test_cycle_focus_length_at_bounds() {
        let mut app = idle_app();
        app.cycle_focus_length(false);
        app.cycle_focus_length(false);
        assert_eq!(app.snapshot().focus_minutes.get(), 15);
        assert_eq!(app.status.as_deref(), Some("Focus length stays at 15m"));
    }

    #[test]
    fn test_switch_session() {
        let mut app = idle_app();
        app.switch_session(SessionType::LongBreak);
        let snap = app.snapshot();
        assert_eq!(snap.session_type, SessionType::LongBreak);
        assert_eq!(snap.remaining_seconds, 900);
    }

    #[test]
    fn test_stats_loaded_from_store() {
        let store = SessionStore::with_database(Database::open_in_memory().unwrap());
        store
            .record(&CompletedSession::now(SessionType::Focus, 1500))
            .unwrap();
        store
            .record(&CompletedSession::now(SessionType::ShortBreak, 300))
            .unwrap();

        let driver = TimerDriver::new(FocusEngine::default(), CompletionObserver::new())
            .with_store(store);
        let app = App::new(driver);

        assert_eq!(app.recent.len(), 2);
        assert_eq!(app.today.sessions, 1);
        assert_eq!(app.today.focus_minutes, 25);
        assert_eq!(app.today.streak_days, Some(1));
    }

    #[test]
    fn test_completion_updates_status_and_stats() {
        let driver = TimerDriver::new(FocusEngine::default(), CompletionObserver::new())
            .with_interval(Duration::from_micros(50));
        let mut app = App::new(driver);
        app.switch_session(SessionType::ShortBreak);
        app.start();

        for _ in 0..10_000 {
            app.on_tick();
            if app.snapshot().session_type == SessionType::Focus {
                break;
            }
            std::thread::sleep(Duration::from_millis(1));
        }

        assert_eq!(app.snapshot().session_type, SessionType::Focus);
        assert_eq!(app.recent.len(), 1);
        assert_eq!(app.today.streak_days, None);
        assert!(app
            .status
            .unwrap()
            .starts_with("Short Break finished. Time for focus time!"));
    }
}
