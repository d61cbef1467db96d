//! One-second tick source.
//!
//! A [`Ticker`] owns a background thread that sends a [`Tick`] down a channel
//! at a fixed interval. Stopping or dropping the handle cancels the thread
//! right away and joins it, so a ticker cannot outlive its owner.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Default tick interval.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// One elapsed interval.
///
/// The generation identifies which ticker produced it, so a consumer can drop
/// ticks still queued from a ticker that has since been stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
}

/// Handle to a running tick thread.
#[derive(Debug)]
pub struct Ticker {
    generation: u64,
    cancel: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn a ticker that sends on `ticks` every `interval`.
    ///
    /// The thread exits when the ticker is stopped or when the receiving end
    /// of `ticks` goes away.
    #[must_use]
    pub fn start(interval: Duration, generation: u64, ticks: Sender<Tick>) -> Self {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            let mut deadline = Instant::now() + interval;
            loop {
                match cancel_rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
                    Err(RecvTimeoutError::Timeout) => {
                        if ticks.send(Tick { generation }).is_err() {
                            break;
                        }
                        deadline += interval;
                    }
                    // Either an explicit cancel or the handle was dropped.
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        tracing::trace!(generation, "ticker started");

        Self {
            generation,
            cancel: Some(cancel_tx),
            handle: Some(handle),
        }
    }

    /// Generation stamped on this ticker's ticks.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancel the tick thread and wait for it to exit.
    pub fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            // The thread may already have exited; that is fine.
            let _ = cancel.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!(generation = self.generation, "ticker thread panicked");
            }
            tracing::trace!(generation = self.generation, "ticker stopped");
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
