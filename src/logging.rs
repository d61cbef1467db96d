//! Log setup.
//!
//! Logs go to a daily rolling file under `~/.studybuddy/logs/` so they never
//! draw over the terminal UI. The filter is read from `STUDYBUDDY_LOG` using
//! the usual `EnvFilter` directive syntax.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Paths;
use crate::error::StudyBuddyError;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "STUDYBUDDY_LOG";

const DEFAULT_FILTER: &str = "studybuddy=info";
const LOG_FILE_PREFIX: &str = "studybuddy.log";

/// The filter from `STUDYBUDDY_LOG`, or the default when unset or invalid.
#[must_use]
pub fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber writing to the log directory.
///
/// The returned guard flushes buffered lines when dropped; keep it alive for
/// the rest of the process.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn init(paths: &Paths) -> Result<WorkerGuard, StudyBuddyError> {
    paths.ensure_dirs()?;

    let appender = tracing_appender::rolling::daily(&paths.logs, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter_from_env())
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| StudyBuddyError::Config(format!("Failed to initialize logging: {e}")))?;

    Ok(guard)
}
