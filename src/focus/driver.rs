//! Glue between the engine, the tick source and the completion observers.
//!
//! [`TimerDriver`] forwards every command to the [`FocusEngine`] and then makes
//! sure exactly one [`Ticker`] exists while the engine is running, and none
//! otherwise. Completions are recorded to the history store (if any) and
//! dispatched to the observer; neither can affect engine state.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use super::engine::{CompletionEvent, FocusEngine};
use super::notify::CompletionObserver;
use super::session::{FocusMinutes, SessionType};
use super::storage::SessionStore;
use super::ticker::{Tick, Ticker, TICK_INTERVAL};
use super::timer::TimerState;
use crate::config::{FocusConfig, Paths};
use crate::error::StudyBuddyError;

/// Owns a focus engine and keeps its tick source in sync.
pub struct TimerDriver {
    engine: FocusEngine,
    observer: CompletionObserver,
    store: Option<SessionStore>,
    tick_tx: Sender<Tick>,
    tick_rx: Receiver<Tick>,
    ticker: Option<Ticker>,
    generation: u64,
    interval: Duration,
}

impl TimerDriver {
    #[must_use]
    pub fn new(engine: FocusEngine, observer: CompletionObserver) -> Self {
        let (tick_tx, tick_rx) = mpsc::channel();
        Self {
            engine,
            observer,
            store: None,
            tick_tx,
            tick_rx,
            ticker: None,
            generation: 0,
            interval: TICK_INTERVAL,
        }
    }

    /// Build a driver from the user's timer settings.
    ///
    /// Opens the history database under `paths` unless recording is turned
    /// off.
    ///
    /// # Errors
    ///
    /// Returns an error if the history database cannot be opened.
    pub fn from_config(config: &FocusConfig, paths: &Paths) -> Result<Self, StudyBuddyError> {
        let engine = FocusEngine::new(config.focus_duration_minutes);
        let driver = Self::new(engine, CompletionObserver::from_config(config));

        if config.record_history {
            Ok(driver.with_store(SessionStore::open(paths)?))
        } else {
            Ok(driver)
        }
    }

    /// Record completions to this store.
    #[must_use]
    pub fn with_store(mut self, store: SessionStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Override the tick interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub const fn engine(&self) -> &FocusEngine {
        &self.engine
    }

    #[must_use]
    pub const fn store(&self) -> Option<&SessionStore> {
        self.store.as_ref()
    }

    /// Whether a tick thread is currently running.
    #[must_use]
    pub const fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Generation of the current (or most recent) ticker.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn start(&mut self) -> bool {
        let applied = self.engine.start();
        self.sync_ticker();
        applied
    }

    pub fn pause(&mut self) -> bool {
        let applied = self.engine.pause();
        self.sync_ticker();
        applied
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.sync_ticker();
    }

    pub fn switch_session(&mut self, session_type: SessionType) {
        self.engine.switch_session(session_type);
        self.sync_ticker();
    }

    pub fn set_focus_duration(&mut self, minutes: FocusMinutes) -> bool {
        let applied = self.engine.set_focus_duration(minutes);
        self.sync_ticker();
        applied
    }

    /// Apply one tick.
    ///
    /// Ticks from a stopped ticker are discarded.
    pub fn handle_tick(&mut self, tick: Tick) -> Option<CompletionEvent> {
        if self.ticker.is_none() || tick.generation != self.generation {
            tracing::trace!(
                tick = tick.generation,
                current = self.generation,
                "stale tick dropped"
            );
            return None;
        }

        let event = self.engine.tick();
        if let Some(event) = &event {
            self.on_completion(event);
            self.sync_ticker();
        }
        event
    }

    /// Wait up to `timeout` for the next tick and apply it.
    pub fn pump(&mut self, timeout: Duration) -> Option<CompletionEvent> {
        match self.tick_rx.recv_timeout(timeout) {
            Ok(tick) => self.handle_tick(tick),
            Err(_) => None,
        }
    }

    /// Apply every tick already queued, without waiting.
    pub fn drain(&mut self) -> Vec<CompletionEvent> {
        let mut events = Vec::new();
        while let Ok(tick) = self.tick_rx.try_recv() {
            if let Some(event) = self.handle_tick(tick) {
                events.push(event);
            }
        }
        events
    }

    fn on_completion(&self, event: &CompletionEvent) {
        if let Some(store) = &self.store {
            if let Some(record) = self.engine.history().next() {
                if let Err(e) = store.record(record) {
                    tracing::warn!(error = %e, "failed to record completed session");
                }
            }
        }

        let failures = self.observer.dispatch(event);
        if failures > 0 {
            tracing::debug!(failures, "some completion sinks failed");
        }
    }

    fn sync_ticker(&mut self) {
        let should_tick = self.engine.state() == TimerState::Running;

        if should_tick && self.ticker.is_none() {
            self.generation += 1;
            self.ticker = Some(Ticker::start(
                self.interval,
                self.generation,
                self.tick_tx.clone(),
            ));
        } else if !should_tick {
            if let Some(mut ticker) = self.ticker.take() {
                ticker.stop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::notify::{MockCueSink, MockNotificationSink};
    use crate::storage::Database;

    fn idle_driver() -> TimerDriver {
        // Long interval: the thread exists but never fires during a test.
        TimerDriver::new(FocusEngine::default(), CompletionObserver::new())
            .with_interval(Duration::from_secs(3600))
    }

    #[test]
    fn test_ticker_follows_running_state() {
        let mut driver = idle_driver();
        assert!(!driver.is_ticking());

        assert!(driver.start());
        assert!(driver.is_ticking());

        assert!(driver.pause());
        assert!(!driver.is_ticking());

        assert!(driver.pause());
        assert!(driver.is_ticking());

        driver.reset();
        assert!(!driver.is_ticking());

        driver.start();
        driver.switch_session(SessionType::LongBreak);
        assert!(!driver.is_ticking());
    }

    #[test]
    fn test_current_tick_decrements_once() {
        let mut driver = idle_driver();
        driver.start();

        let tick = Tick {
            generation: driver.generation(),
        };
        assert!(driver.handle_tick(tick).is_none());
        assert_eq!(driver.engine().remaining_seconds(), 1499);
    }

    #[test]
    fn test_stale_tick_ignored() {
        let mut driver = idle_driver();
        driver.start();
        let old = driver.generation();
        driver.pause();
        driver.pause();
        assert_ne!(driver.generation(), old);

        assert!(driver.handle_tick(Tick { generation: old }).is_none());
        assert_eq!(driver.engine().remaining_seconds(), 1500);
    }

    #[test]
    fn test_tick_while_paused_ignored() {
        let mut driver = idle_driver();
        driver.start();
        let generation = driver.generation();
        driver.pause();

        assert!(driver.handle_tick(Tick { generation }).is_none());
        assert_eq!(driver.engine().remaining_seconds(), 1500);
    }

    #[test]
    fn test_set_focus_duration_through_driver() {
        let mut driver = idle_driver();
        let thirty = FocusMinutes::try_from(30).unwrap();
        assert!(driver.set_focus_duration(thirty));
        driver.start();
        assert!(!driver.set_focus_duration(FocusMinutes::DEFAULT));
        assert_eq!(driver.engine().focus_minutes(), thirty);
        assert!(driver.is_ticking());
    }

    #[test]
    fn test_completion_records_and_notifies() {
        let mut notifier = MockNotificationSink::new();
        notifier.expect_notify().times(1).returning(|_| Ok(()));

        let store = SessionStore::with_database(Database::open_in_memory().unwrap());
        let mut driver = TimerDriver::new(
            FocusEngine::default(),
            CompletionObserver::new().with_notifier(notifier),
        )
        .with_store(store)
        .with_interval(Duration::from_millis(1));

        driver.switch_session(SessionType::ShortBreak);
        driver.start();

        let mut completed = None;
        for _ in 0..10_000 {
            if let Some(event) = driver.pump(Duration::from_secs(1)) {
                completed = Some(event);
                break;
            }
        }

        let event = completed.unwrap();
        assert_eq!(event.completed, SessionType::ShortBreak);
        assert_eq!(event.next, SessionType::Focus);
        assert!(!driver.is_ticking());
        assert_eq!(driver.engine().session_type(), SessionType::Focus);
        assert_eq!(driver.store().unwrap().count().unwrap(), 1);

        // Leftover ticks from the finished ticker change nothing.
        assert!(driver.drain().is_empty());
        assert_eq!(driver.engine().remaining_seconds(), 1500);
    }

    #[test]
    fn test_failing_sinks_and_store_keep_the_transition() {
        let mut notifier = MockNotificationSink::new();
        notifier
            .expect_notify()
            .times(1)
            .returning(|_| Err(StudyBuddyError::Notify("no display".to_string())));
        let mut cue = MockCueSink::new();
        cue.expect_play_cue()
            .times(1)
            .returning(|| Err(StudyBuddyError::Notify("muted".to_string())));

        let db = Database::open_in_memory().unwrap();
        db.connection()
            .execute("DROP TABLE completed_sessions", [])
            .unwrap();

        let fifteen = FocusMinutes::try_from(15).unwrap();
        let mut driver = TimerDriver::new(
            FocusEngine::new(fifteen),
            CompletionObserver::new().with_notifier(notifier).with_cue(cue),
        )
        .with_store(SessionStore::with_database(db))
        .with_interval(Duration::from_secs(3600));
        driver.start();

        let mut completed = None;
        for _ in 0..15 * 60 {
            let tick = Tick {
                generation: driver.generation(),
            };
            completed = driver.handle_tick(tick);
        }

        let event = completed.unwrap();
        assert_eq!(event.completed, SessionType::Focus);
        assert_eq!(event.next, SessionType::ShortBreak);
        assert_eq!(driver.engine().session_type(), SessionType::ShortBreak);
        assert_eq!(driver.engine().state(), TimerState::Idle);
        assert_eq!(driver.engine().sessions_completed(), 1);
        assert_eq!(driver.engine().cumulative_focus_seconds(), 15 * 60);
        assert_eq!(driver.engine().history().count(), 1);
        assert!(!driver.is_ticking());
    }

    #[test]
    fn test_from_config_opens_store_only_when_recording() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join(".studybuddy"));
        let mut config = FocusConfig {
            focus_duration_minutes: FocusMinutes::try_from(45).unwrap(),
            record_history: false,
            ..FocusConfig::default()
        };

        let driver = TimerDriver::from_config(&config, &paths).unwrap();
        assert!(driver.store().is_none());
        assert!(!paths.database.exists());
        assert_eq!(driver.engine().remaining_seconds(), 45 * 60);

        config.record_history = true;
        let driver = TimerDriver::from_config(&config, &paths).unwrap();
        assert!(driver.store().is_some());
        assert!(paths.database.exists());
    }
}
