//! Focus session reports.
//!
//! Summarizes recorded history over a period of local calendar days.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::engine::LONG_BREAK_EVERY;
use super::session::{CompletedSession, SessionType};
use super::storage::SessionStore;
use super::timer::format_duration;
use crate::error::StudyBuddyError;

/// Report time period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// Today only
    Today,
    /// Last 7 days
    Week,
    /// Last 30 days
    Month,
    /// All time
    AllTime,
}

impl ReportPeriod {
    /// First local day covered, or `None` for all time.
    #[must_use]
    pub fn first_day(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Today => Some(today),
            Self::Week => Some(today - Duration::days(6)),
            Self::Month => Some(today - Duration::days(29)),
            Self::AllTime => None,
        }
    }

    /// UTC bounds `[start, end)` covering this period up to the end of today.
    #[must_use]
    pub fn date_range(&self, today: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let end = local_midnight(today + Duration::days(1));
        let start = self
            .first_day(today)
            .map_or_else(DateTime::<Utc>::default, local_midnight);
        (start, end)
    }

    /// Parse period from string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "today" | "t" | "d" | "day" => Some(Self::Today),
            "week" | "w" | "7d" => Some(Self::Week),
            "month" | "m" | "30d" => Some(Self::Month),
            "all" | "alltime" | "all-time" => Some(Self::AllTime),
            _ => None,
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Week => "Last 7 Days",
            Self::Month => "Last 30 Days",
            Self::AllTime => "All Time",
        }
    }
}

/// Start of a local calendar day, in UTC.
fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map_or_else(|| Utc.from_utc_datetime(&naive), |t| t.with_timezone(&Utc))
}

/// Focus report data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusReport {
    /// Report period name
    pub period: String,
    /// Completed focus sessions
    pub focus_sessions: u32,
    /// Total focus time in minutes
    pub focus_minutes: u64,
    /// Short breaks taken
    pub short_breaks: u32,
    /// Long breaks taken
    pub long_breaks: u32,
    /// Average focus session length in minutes
    pub avg_focus_minutes: f64,
    /// Focus minutes by weekday, Monday first
    pub by_day_of_week: [u64; 7],
    /// Daily breakdown, most recent first
    pub daily: Vec<DailyFocusTime>,
    /// Consecutive days with at least one focus session, ending today or yesterday
    pub streak_days: u32,
    /// Completed four-session cycles
    pub cycles: u32,
}

/// Focus time per day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyFocusTime {
    pub date: NaiveDate,
    pub minutes: u64,
    pub sessions: u32,
}

impl FocusReport {
    /// Generate a report for the given period from stored history.
    ///
    /// The day streak always looks at the whole history, whatever the period.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be read.
    pub fn generate(store: &SessionStore, period: ReportPeriod) -> Result<Self, StudyBuddyError> {
        let today = Local::now().date_naive();
        let (start, end) = period.date_range(today);
        let sessions = store.range(start, end)?;
        let streak_days = calculate_streak(&store.focus_days()?, today);
        Ok(Self::from_sessions(period, &sessions, streak_days))
    }

    /// Build a report from an already-selected slice of sessions and a day
    /// streak computed over the full history.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_sessions(
        period: ReportPeriod,
        sessions: &[CompletedSession],
        streak_days: u32,
    ) -> Self {
        let mut focus_sessions = 0u32;
        let mut focus_seconds = 0u64;
        let mut short_breaks = 0u32;
        let mut long_breaks = 0u32;
        let mut by_day_of_week = [0u64; 7];
        let mut daily_map: BTreeMap<NaiveDate, (u64, u32)> = BTreeMap::new();

        for session in sessions {
            match session.session_type {
                SessionType::ShortBreak => short_breaks += 1,
                SessionType::LongBreak => long_breaks += 1,
                SessionType::Focus => {
                    let local = session.completed_at_local();
                    let minutes = u64::from(session.duration_minutes());
                    focus_sessions += 1;
                    focus_seconds += u64::from(session.duration_seconds);
                    by_day_of_week[local.weekday().num_days_from_monday() as usize] += minutes;

                    let entry = daily_map.entry(local.date_naive()).or_insert((0, 0));
                    entry.0 += minutes;
                    entry.1 += 1;
                }
            }
        }

        let avg_focus_minutes = if focus_sessions > 0 {
            focus_seconds as f64 / 60.0 / f64::from(focus_sessions)
        } else {
            0.0
        };

        let daily = daily_map
            .into_iter()
            .rev()
            .map(|(date, (minutes, sessions))| DailyFocusTime {
                date,
                minutes,
                sessions,
            })
            .collect();

        Self {
            period: period.display_name().to_string(),
            focus_sessions,
            focus_minutes: focus_seconds / 60,
            short_breaks,
            long_breaks,
            avg_focus_minutes,
            by_day_of_week,
            daily,
            streak_days,
            cycles: focus_sessions / LONG_BREAK_EVERY,
        }
    }

    /// Format the report for display.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn format(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("📊 Focus Report: {}", self.period));
        lines.push("═".repeat(50));
        lines.push(String::new());

        lines.push("Summary".to_string());
        lines.push("─".repeat(40));
        lines.push(format!(
            "  Total focus time:    {}",
            format_duration(Duration::minutes(
                i64::try_from(self.focus_minutes).unwrap_or_default()
            ))
        ));
        lines.push(format!("  Focus sessions:      {}", self.focus_sessions));
        lines.push(format!("  Completed cycles:    {}", self.cycles));
        lines.push(format!(
            "  Breaks taken:        {} short, {} long",
            self.short_breaks, self.long_breaks
        ));
        lines.push(format!(
            "  Average session:     {:.0} minutes",
            self.avg_focus_minutes
        ));
        lines.push(format!("  Current streak:      {} days", self.streak_days));
        lines.push(String::new());

        if self.focus_minutes > 0 {
            lines.push("By Day of Week".to_string());
            lines.push("─".repeat(40));
            let days = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
            let max_day = self.by_day_of_week.iter().max().copied().unwrap_or(1).max(1);

            for (day, minutes) in days.iter().zip(self.by_day_of_week) {
                let bar_len = (minutes as f64 / max_day as f64 * 20.0) as usize;
                lines.push(format!("  {day} {minutes:>4}m {}", "█".repeat(bar_len)));
            }
            lines.push(String::new());
        }

        if !self.daily.is_empty() {
            lines.push("Recent Days".to_string());
            lines.push("─".repeat(40));

            for day in self.daily.iter().take(7) {
                lines.push(format!(
                    "  {} {:>4}m ({} sessions)",
                    day.date, day.minutes, day.sessions
                ));
            }
        }

        lines.join("\n")
    }
}

/// Count consecutive active days backwards from today.
///
/// A day without focus yet does not break the streak until it is over, so the
/// count starts from yesterday when today is still empty.
fn calculate_streak(days: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut check_date = if days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };

    let mut streak = 0;
    while days.contains(&check_date) {
        streak += 1;
        check_date -= Duration::days(1);
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    fn at_local(date: NaiveDate, hour: u32) -> DateTime<Utc> {
        let naive = date.and_hms_opt(hour, 0, 0).unwrap();
        Local
            .from_local_datetime(&naive)
            .earliest()
            .unwrap()
            .with_timezone(&Utc)
    }

    fn focus(date: NaiveDate) -> CompletedSession {
        CompletedSession {
            session_type: SessionType::Focus,
            duration_seconds: 1500,
            completed_at: at_local(date, 12),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_report_period_parse() {
        assert_eq!(ReportPeriod::parse("today"), Some(ReportPeriod::Today));
        assert_eq!(ReportPeriod::parse("week"), Some(ReportPeriod::Week));
        assert_eq!(ReportPeriod::parse("month"), Some(ReportPeriod::Month));
        assert_eq!(ReportPeriod::parse("all"), Some(ReportPeriod::AllTime));
        assert_eq!(ReportPeriod::parse("fortnight"), None);
    }

    #[test]
    fn test_date_range_covers_today() {
        let (start, end) = ReportPeriod::Today.date_range(today());
        assert!(start < end);
        assert!(start <= at_local(today(), 12) && at_local(today(), 12) < end);

        let (week_start, _) = ReportPeriod::Week.date_range(today());
        assert!(week_start < start);
    }

    #[test]
    fn test_report_counts() {
        let t = today();
        let mut sessions = vec![focus(t), focus(t), focus(t - Duration::days(1))];
        sessions.push(CompletedSession {
            session_type: SessionType::ShortBreak,
            duration_seconds: 300,
            completed_at: at_local(t, 13),
        });
        sessions.push(CompletedSession {
            session_type: SessionType::LongBreak,
            duration_seconds: 900,
            completed_at: at_local(t, 14),
        });

        let report = FocusReport::from_sessions(ReportPeriod::Week, &sessions, 2);
        assert_eq!(report.focus_sessions, 3);
        assert_eq!(report.focus_minutes, 75);
        assert_eq!(report.short_breaks, 1);
        assert_eq!(report.long_breaks, 1);
        assert!((report.avg_focus_minutes - 25.0).abs() < 0.01);
        assert_eq!(report.streak_days, 2);
        assert_eq!(report.cycles, 0);
        assert_eq!(report.daily.len(), 2);
        assert_eq!(report.daily[0].date, t);
        assert_eq!(report.daily[0].sessions, 2);
    }

    #[test]
    fn test_cycles() {
        let t = today();
        let sessions: Vec<_> = (0..9).map(|_| focus(t)).collect();
        let report = FocusReport::from_sessions(ReportPeriod::Today, &sessions, 1);
        assert_eq!(report.cycles, 2);
    }

    #[test]
    fn test_streak_starts_yesterday_when_today_empty() {
        let t = today();
        let days: HashSet<_> = [t - Duration::days(1), t - Duration::days(2)]
            .into_iter()
            .collect();
        assert_eq!(calculate_streak(&days, t), 2);

        let gap: HashSet<_> = [t - Duration::days(2)].into_iter().collect();
        assert_eq!(calculate_streak(&gap, t), 0);
    }

    #[test]
    fn test_streak_spans_days_outside_the_period() {
        let store = SessionStore::with_database(Database::open_in_memory().unwrap());
        let t = Local::now().date_naive();
        for offset in 0..3 {
            store.record(&focus(t - Duration::days(offset))).unwrap();
        }

        let today = FocusReport::generate(&store, ReportPeriod::Today).unwrap();
        let all = FocusReport::generate(&store, ReportPeriod::AllTime).unwrap();

        assert_eq!(today.focus_sessions, 1);
        assert_eq!(all.focus_sessions, 3);
        assert_eq!(today.streak_days, 3);
        assert_eq!(all.streak_days, 3);
    }

    #[test]
    fn test_empty_report_formats() {
        let report = FocusReport::from_sessions(ReportPeriod::Today, &[], 0);
        assert_eq!(report.focus_sessions, 0);
        assert!(report.avg_focus_minutes.abs() < f64::EPSILON);
        let text = report.format();
        assert!(text.contains("Focus Report: Today"));
        assert!(!text.contains("By Day of Week"));
    }
}
