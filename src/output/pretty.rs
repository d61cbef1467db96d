use colored::Colorize;

use crate::focus::{format_mmss, CompletedSession, CompletionEvent, SessionType};

/// Colored, column-padded label for a session type.
fn session_label(session_type: SessionType) -> String {
    // Pad before coloring so escape codes don't break alignment.
    let padded = match session_type {
        SessionType::Focus => format!("{:<6}", "Focus").red(),
        SessionType::ShortBreak => format!("{:<6}", "Break").green(),
        SessionType::LongBreak => format!("{:<6}", "Long").blue(),
    };
    padded.to_string()
}

/// Format completed sessions as a table, most recent first
pub fn format_sessions_pretty(sessions: &[CompletedSession]) -> String {
    if sessions.is_empty() {
        return "No completed sessions yet.\n\nStart one with: studybuddy start".to_string();
    }

    let mut output = Vec::new();
    output.push("📋 Session History".bold().to_string());
    output.push("═".repeat(40));
    output.push(format!("{:<17} {:<6} {:>8}", "Completed", "Type", "Duration"));
    output.push("─".repeat(40));

    for session in sessions {
        let when = session.completed_at_local().format("%Y-%m-%d %H:%M").to_string();
        output.push(format!(
            "{when:<17} {} {:>8}",
            session_label(session.session_type),
            format_mmss(session.duration_seconds)
        ));
    }

    output.push(String::new());
    output.push(format!("{} sessions", sessions.len()).dimmed().to_string());
    output.join("\n")
}

/// Format the sessions completed by a `start` run
pub fn format_events_pretty(events: &[CompletionEvent]) -> String {
    if events.is_empty() {
        return "No sessions completed.".to_string();
    }

    let mut output = Vec::new();
    for event in events {
        output.push(format!(
            "✅ {} complete ({})",
            event.completed.display_name().bold(),
            format_mmss(event.duration_seconds)
        ));
    }

    if let Some(last) = events.last() {
        output.push(String::new());
        output.push(
            format!("   Up next: {}", last.next.display_name())
                .dimmed()
                .to_string(),
        );
    }

    output.join("\n")
}
