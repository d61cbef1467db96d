//! Completed-session storage.
//!
//! Persists the engine's completion log to the local database so history and
//! reports survive across runs.

use std::collections::HashSet;

use chrono::{DateTime, Local, NaiveDate, SecondsFormat, Utc};
use rusqlite::{params, Row};

use super::session::{CompletedSession, SessionType};
use crate::config::Paths;
use crate::error::StudyBuddyError;
use crate::storage::Database;

/// Storage for completed sessions.
pub struct SessionStore {
    db: Database,
}

impl SessionStore {
    /// Open the store in the database under `paths`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(paths: &Paths) -> Result<Self, StudyBuddyError> {
        let db = Database::open(paths)?;
        Ok(Self { db })
    }

    /// Create storage with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Append a completed session, returning its row id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn record(&self, session: &CompletedSession) -> Result<i64, StudyBuddyError> {
        let conn = self.db.connection();

        conn.execute(
            r"INSERT INTO completed_sessions (session_type, duration_seconds, completed_at)
              VALUES (?1, ?2, ?3)",
            params![
                session.session_type.as_str(),
                session.duration_seconds,
                timestamp(session.completed_at),
            ],
        )
        .map_err(|e| StudyBuddyError::Database(format!("Failed to record session: {e}")))?;

        Ok(conn.last_insert_rowid())
    }

    /// Most recent sessions first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn recent(&self, limit: usize) -> Result<Vec<CompletedSession>, StudyBuddyError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                r"SELECT session_type, duration_seconds, completed_at
                  FROM completed_sessions
                  ORDER BY completed_at DESC, id DESC
                  LIMIT ?1",
            )
            .map_err(|e| StudyBuddyError::Database(format!("Failed to prepare query: {e}")))?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map([limit], row_to_session)
            .map_err(|e| StudyBuddyError::Database(format!("Failed to query sessions: {e}")))?;

        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(row.map_err(|e| StudyBuddyError::Database(e.to_string()))?);
        }

        Ok(sessions)
    }

    /// Sessions completed in `[start, end)`, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CompletedSession>, StudyBuddyError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                r"SELECT session_type, duration_seconds, completed_at
                  FROM completed_sessions
                  WHERE completed_at >= ?1 AND completed_at < ?2
                  ORDER BY completed_at DESC, id DESC",
            )
            .map_err(|e| StudyBuddyError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([timestamp(start), timestamp(end)], row_to_session)
            .map_err(|e| StudyBuddyError::Database(format!("Failed to query sessions: {e}")))?;

        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(row.map_err(|e| StudyBuddyError::Database(e.to_string()))?);
        }

        Ok(sessions)
    }

    /// Local calendar days with at least one completed focus session.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn focus_days(&self) -> Result<HashSet<NaiveDate>, StudyBuddyError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                r"SELECT completed_at
                  FROM completed_sessions
                  WHERE session_type = ?1",
            )
            .map_err(|e| StudyBuddyError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([SessionType::Focus.as_str()], |row| row.get::<_, String>(0))
            .map_err(|e| StudyBuddyError::Database(format!("Failed to query focus days: {e}")))?;

        let mut days = HashSet::new();
        for row in rows {
            let raw = row.map_err(|e| StudyBuddyError::Database(e.to_string()))?;
            let completed_at = DateTime::parse_from_rfc3339(&raw)
                .map_err(|e| StudyBuddyError::Parse(format!("Bad timestamp '{raw}': {e}")))?;
            days.insert(completed_at.with_timezone(&Local).date_naive());
        }

        Ok(days)
    }

    /// Number of recorded sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count(&self) -> Result<i64, StudyBuddyError> {
        self.db
            .connection()
            .query_row("SELECT COUNT(*) FROM completed_sessions", [], |row| {
                row.get(0)
            })
            .map_err(|e| StudyBuddyError::Database(format!("Failed to count sessions: {e}")))
    }

    /// Delete every recorded session, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn clear(&self) -> Result<usize, StudyBuddyError> {
        self.db
            .connection()
            .execute("DELETE FROM completed_sessions", [])
            .map_err(|e| StudyBuddyError::Database(format!("Failed to delete sessions: {e}")))
    }
}

/// Fixed-width UTC timestamps so that text ordering matches time ordering.
fn timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn row_to_session(row: &Row<'_>) -> Result<CompletedSession, rusqlite::Error> {
    let session_type_str: String = row.get(0)?;
    let duration_seconds: u32 = row.get(1)?;
    let completed_at_str: String = row.get(2)?;

    let session_type = SessionType::parse(&session_type_str).ok_or_else(|| {
        rusqlite::Error::InvalidColumnType(
            0,
            format!("session_type '{session_type_str}'"),
            rusqlite::types::Type::Text,
        )
    })?;

    let completed_at = DateTime::parse_from_rfc3339(&completed_at_str)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(CompletedSession {
        session_type,
        duration_seconds,
        completed_at,
    })
}
