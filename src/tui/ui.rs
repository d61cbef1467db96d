//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph},
    Frame,
};

use crate::focus::{format_mmss, SessionType, TimerState};
use crate::tui::app::App;

const HELP_TEXT: &str = "space/s  start\n\
                         p        pause / resume\n\
                         r        reset\n\
                         1 2 3    focus / short break / long break\n\
                         + -      focus length\n\
                         ?        close help\n\
                         q        quit";

const fn session_color(session_type: SessionType) -> Color {
    match session_type {
        SessionType::Focus => Color::Red,
        SessionType::ShortBreak => Color::Green,
        SessionType::LongBreak => Color::Blue,
    }
}

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(5), // Clock
            Constraint::Length(3), // Progress
            Constraint::Length(3), // Today
            Constraint::Min(0),    // Recent sessions
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_clock(frame, app, chunks[1]);
    render_progress(frame, app, chunks[2]);
    render_today(frame, app, chunks[3]);
    render_recent(frame, app, chunks[4]);
    render_status_bar(frame, app, chunks[5]);

    if app.show_help {
        render_help(frame, frame.area());
    }
}

fn render_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let snap = app.snapshot();
    let color = session_color(snap.session_type);

    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", snap.session_type.display_name()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" focus {}  cycle {} ", snap.focus_minutes, snap.streak),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );

    frame.render_widget(header, area);
}

fn render_clock(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let snap = app.snapshot();
    let state = match snap.state {
        TimerState::Idle => "ready",
        TimerState::Running => "running",
        TimerState::Paused => "paused",
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            snap.formatted_time,
            Style::default()
                .fg(session_color(snap.session_type))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(state, Style::default().fg(Color::DarkGray))),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_progress(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let snap = app.snapshot();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(session_color(snap.session_type)))
        .ratio(snap.progress.clamp(0.0, 1.0))
        .label(format!(
            "{} / {}",
            format_mmss(snap.full_duration_seconds.saturating_sub(snap.remaining_seconds)),
            format_mmss(snap.full_duration_seconds)
        ));

    frame.render_widget(gauge, area);
}

fn render_today(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let mut text = format!(
        "Sessions: {}   Focus: {}m",
        app.today.sessions, app.today.focus_minutes
    );
    if let Some(days) = app.today.streak_days {
        text.push_str(&format!("   Streak: {days} days"));
    }

    let today = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(" Today "));
    frame.render_widget(today, area);
}

fn render_recent(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items: Vec<ListItem<'_>> = app
        .recent
        .iter()
        .map(|session| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    session.completed_at_local().format("%H:%M  ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<12}", session.session_type.display_name()),
                    Style::default().fg(session_color(session.session_type)),
                ),
                Span::raw(format_mmss(session.duration_seconds)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Recent Sessions "),
    );

    frame.render_widget(list, area);
}

fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = app
        .status
        .as_deref()
        .unwrap_or("space:start | p:pause | r:reset | 1/2/3:session | +/-:length | ?:help | q:quit");

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

fn render_help(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered(area, 48, 9);
    let help = Paragraph::new(HELP_TEXT).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Keys ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(help, popup);
}

/// A `width` x `height` rectangle centered in `area`, clipped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
