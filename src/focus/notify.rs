//! Completion notifications and audible cues.
//!
//! The engine only produces [`CompletionEvent`] values. Delivering them to the
//! desktop, the terminal or the log happens here, and a failed delivery is
//! logged and dropped without ever reaching back into the timer.

use std::io::Write;
use std::process::{Command, Stdio};

use serde::Serialize;

use super::engine::CompletionEvent;
use crate::config::FocusConfig;
use crate::error::StudyBuddyError;

/// Title used for every completion notification.
pub const COMPLETION_TITLE: &str = "Study Session Complete!";

/// A notification ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    /// Build the notification announcing a completed session.
    #[must_use]
    pub fn for_completion(event: &CompletionEvent) -> Self {
        let follow_up = if event.completed.is_break() {
            "focus time"
        } else {
            "a break"
        };
        Self {
            title: COMPLETION_TITLE.to_string(),
            body: format!(
                "{} finished. Time for {follow_up}!",
                event.completed.display_name()
            ),
        }
    }
}

/// Something that can show a notification to the user.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink {
    /// Deliver one notification.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery failed; callers log and ignore it.
    fn notify(&self, notification: &Notification) -> Result<(), StudyBuddyError>;
}

/// Something that can play the completion sound.
#[cfg_attr(test, mockall::automock)]
pub trait CueSink {
    /// Play the cue once.
    ///
    /// # Errors
    ///
    /// Returns an error if playback failed; callers log and ignore it.
    fn play_cue(&self) -> Result<(), StudyBuddyError>;
}

/// Writes notifications to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), StudyBuddyError> {
        tracing::info!(title = %notification.title, body = %notification.body, "notification");
        Ok(())
    }
}

/// Shows a desktop notification through the platform's command line tool.
///
/// Uses `osascript` on macOS and `notify-send` elsewhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    fn command(notification: &Notification) -> Command {
        if cfg!(target_os = "macos") {
            let script = format!(
                "display notification {} with title {}",
                applescript_string(&notification.body),
                applescript_string(&notification.title)
            );
            let mut cmd = Command::new("osascript");
            cmd.arg("-e").arg(script);
            cmd
        } else {
            let mut cmd = Command::new("notify-send");
            cmd.arg("--app-name=studybuddy")
                .arg(&notification.title)
                .arg(&notification.body);
            cmd
        }
    }
}

impl NotificationSink for DesktopNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), StudyBuddyError> {
        let output = Self::command(notification)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| StudyBuddyError::Notify(format!("failed to launch notifier: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StudyBuddyError::Notify(format!(
                "notifier exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

/// Quote a string as an AppleScript literal.
fn applescript_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Rings the terminal bell.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl CueSink for TerminalBell {
    fn play_cue(&self) -> Result<(), StudyBuddyError> {
        let mut out = std::io::stderr();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }
}

/// Plays a system sound file, falling back to the terminal bell.
#[derive(Debug, Default, Clone, Copy)]
pub struct SoundCue;

impl SoundCue {
    const CANDIDATES: [(&'static str, &'static str); 3] = [
        ("afplay", "/System/Library/Sounds/Glass.aiff"),
        ("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
        ("aplay", "/usr/share/sounds/alsa/Front_Center.wav"),
    ];
}

impl CueSink for SoundCue {
    fn play_cue(&self) -> Result<(), StudyBuddyError> {
        let found = Self::CANDIDATES
            .iter()
            .find(|(_, file)| std::path::Path::new(file).exists());

        let Some((player, file)) = found else {
            return TerminalBell.play_cue();
        };

        // Playback runs detached; only a failure to launch is reported.
        Command::new(player)
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|e| StudyBuddyError::Notify(format!("failed to launch {player}: {e}")))
    }
}

/// Fans completion events out to every registered sink.
#[derive(Default)]
pub struct CompletionObserver {
    notifiers: Vec<Box<dyn NotificationSink>>,
    cues: Vec<Box<dyn CueSink>>,
}

impl CompletionObserver {
    /// An observer with no sinks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The sinks enabled by the user's settings.
    ///
    /// Completions are always written to the log.
    #[must_use]
    pub fn from_config(config: &FocusConfig) -> Self {
        let mut observer = Self::new().with_notifier(LogNotifier);
        if config.notifications {
            observer = observer.with_notifier(DesktopNotifier);
        }
        if config.notification_sound {
            observer = observer.with_cue(SoundCue);
        }
        observer
    }

    /// Number of registered sinks.
    #[must_use]
    pub fn sink_count(&self) -> usize {
        self.notifiers.len() + self.cues.len()
    }

    /// Add a notification sink.
    #[must_use]
    pub fn with_notifier(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.notifiers.push(Box::new(sink));
        self
    }

    /// Add a cue sink.
    #[must_use]
    pub fn with_cue(mut self, sink: impl CueSink + 'static) -> Self {
        self.cues.push(Box::new(sink));
        self
    }

    /// Deliver a completion to every sink.
    ///
    /// Each failure is logged; the rest of the sinks still run. Returns the
    /// number of sinks that failed.
    pub fn dispatch(&self, event: &CompletionEvent) -> usize {
        let notification = Notification::for_completion(event);
        let mut failures = 0;

        for sink in &self.notifiers {
            if let Err(e) = sink.notify(&notification) {
                tracing::warn!(error = %e, "notification delivery failed");
                failures += 1;
            }
        }

        for cue in &self.cues {
            if let Err(e) = cue.play_cue() {
                tracing::warn!(error = %e, "completion cue failed");
                failures += 1;
            }
        }

        failures
    }
}
