//! Timer and history command implementations.

use std::io::{IsTerminal, Write};
use std::time::Duration;

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{OutputFormat, StartArgs};
use crate::config::{Config, Paths};
use crate::error::StudyBuddyError;
use crate::focus::{
    render_progress_bar, CompletionEvent, FocusEngine, FocusReport, ReportPeriod, SessionStore,
    TimerDriver,
};
use crate::output::{format_events, format_sessions, to_json};

/// How long to wait for a tick before redrawing the countdown.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Run the timer in the plain terminal until `--cycles` sessions complete.
///
/// Each completed session stages the next one, which is started right away
/// while more cycles remain. The countdown is drawn on stderr when it is a
/// terminal, so stdout carries only the final summary.
///
/// # Errors
///
/// Returns an error if `--cycles` is zero or the history database cannot be
/// opened.
pub fn start(
    args: &StartArgs,
    config: &Config,
    paths: &Paths,
    format: OutputFormat,
) -> Result<String, StudyBuddyError> {
    if args.cycles == 0 {
        return Err(StudyBuddyError::InvalidInput(
            "--cycles must be at least 1".to_string(),
        ));
    }

    let mut settings = config.focus.clone();
    if let Some(minutes) = args.duration {
        settings.focus_duration_minutes = minutes;
    }
    if args.no_record {
        settings.record_history = false;
    }

    let mut driver = TimerDriver::from_config(&settings, paths)?;
    driver.switch_session(args.session.into());

    let show_countdown = format == OutputFormat::Pretty && std::io::stderr().is_terminal();
    let events = run_cycles(&mut driver, args.cycles, |engine, event| {
        if show_countdown {
            draw_countdown(engine, event);
        }
    });

    format_events(&events, format)
}

/// Drive `driver` until `cycles` sessions have completed.
///
/// `on_update` runs after every poll, with the completion if one just happened.
fn run_cycles(
    driver: &mut TimerDriver,
    cycles: u32,
    mut on_update: impl FnMut(&FocusEngine, Option<&CompletionEvent>),
) -> Vec<CompletionEvent> {
    let mut events = Vec::new();
    let mut completed = 0;

    driver.start();
    on_update(driver.engine(), None);

    while completed < cycles && driver.is_ticking() {
        let event = driver.pump(POLL_INTERVAL);
        on_update(driver.engine(), event.as_ref());

        if let Some(event) = event {
            completed += 1;
            events.push(event);
            if completed < cycles {
                driver.start();
            }
        }
    }

    events
}

fn draw_countdown(engine: &FocusEngine, event: Option<&CompletionEvent>) {
    let mut err = std::io::stderr();

    if let Some(event) = event {
        let _ = writeln!(
            err,
            "\r{} {} {}",
            "✅".green(),
            event.completed.display_name().bold(),
            "complete".green()
        );
    }

    let _ = write!(
        err,
        "\r{:<12} {} {}",
        engine.session_type().display_name(),
        engine.formatted_time().bold(),
        render_progress_bar(engine.progress_fraction(), 30)
    );
    let _ = err.flush();

    if !engine.is_running() {
        let _ = writeln!(err);
    }
}

/// Show recent completed sessions.
///
/// # Errors
///
/// Returns an error if the history cannot be read.
pub fn history(
    store: &SessionStore,
    limit: usize,
    format: OutputFormat,
) -> Result<String, StudyBuddyError> {
    let sessions = store.recent(limit)?;
    format_sessions(&sessions, format)
}

/// Generate a focus report.
///
/// # Errors
///
/// Returns an error if the period is unknown or the history cannot be read.
pub fn report(
    store: &SessionStore,
    period: &str,
    format: OutputFormat,
) -> Result<String, StudyBuddyError> {
    let report_period = ReportPeriod::parse(period).ok_or_else(|| {
        StudyBuddyError::InvalidInput(format!(
            "Unknown report period: {period}. Use today, week, month or all"
        ))
    })?;
    let report = FocusReport::generate(store, report_period)?;

    match format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Pretty => Ok(report.format()),
    }
}

/// Delete all recorded sessions.
///
/// # Errors
///
/// Returns an error without `--force`, or if the delete fails.
pub fn clear(
    store: &SessionStore,
    force: bool,
    format: OutputFormat,
) -> Result<String, StudyBuddyError> {
    if !force {
        return Err(StudyBuddyError::InvalidInput(
            "This will delete all session history.\nUse --force to confirm.".to_string(),
        ));
    }

    let removed = store.clear()?;
    tracing::info!(removed, "session history cleared");

    match format {
        OutputFormat::Json => to_json(&json!({ "cleared": removed })),
        OutputFormat::Pretty => Ok(format!("🗑️  Cleared {removed} sessions from history.")),
    }
}
