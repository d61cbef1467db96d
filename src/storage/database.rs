//! `SQLite` database connection.
//!
//! The database is stored at `~/.studybuddy/studybuddy.db` and holds the log of
//! completed timer sessions. The interactive timer may be writing while a
//! `history` or `report` command reads, so file databases use WAL journaling
//! and wait briefly on a locked database instead of failing.

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use crate::config::Paths;
use crate::error::StudyBuddyError;

use super::migrations;

/// How long a statement waits on a lock held by another process.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database under `paths`, creating the data directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open(paths: &Paths) -> Result<Self, StudyBuddyError> {
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open the database at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &Path) -> Result<Self, StudyBuddyError> {
        let conn = Connection::open(path).map_err(|e| {
            StudyBuddyError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| StudyBuddyError::Database(format!("Failed to set busy timeout: {e}")))?;
        let mode: String = conn
            .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
            .map_err(|e| StudyBuddyError::Database(format!("Failed to enable WAL: {e}")))?;

        let db = Self::migrated(conn)?;
        tracing::debug!(path = %path.display(), journal = %mode, "database opened");
        Ok(db)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, StudyBuddyError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            StudyBuddyError::Database(format!("Failed to open in-memory database: {e}"))
        })?;
        Self::migrated(conn)
    }

    fn migrated(conn: Connection) -> Result<Self, StudyBuddyError> {
        migrations::run(&conn)?;
        Ok(Self { conn })
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, StudyBuddyError> {
        migrations::get_version(&self.conn)
    }

    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.schema_version().unwrap() > 0);
    }

    #[test]
    fn test_open_creates_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join(".studybuddy"));

        let db = Database::open(&paths).unwrap();
        assert!(db.schema_version().unwrap() > 0);
        assert!(paths.database.exists());
    }

    #[test]
    fn test_file_database_uses_wal() {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::open_at(&temp_dir.path().join("test.db")).unwrap();

        let mode: String = db
            .connection()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        {
            let db = Database::open_at(&db_path).unwrap();
            db.connection()
                .execute(
                    "INSERT INTO completed_sessions (session_type, duration_seconds, completed_at)
                     VALUES ('focus', 1500, '2024-01-01T10:00:00.000Z')",
                    [],
                )
                .unwrap();
        }

        let db = Database::open_at(&db_path).unwrap();
        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM completed_sessions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
