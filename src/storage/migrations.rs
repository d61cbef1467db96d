//! Database migrations for studybuddy.
//!
//! Each migration upgrades the schema by one version. Migrations run
//! automatically when the database is opened; the version lives in
//! `PRAGMA user_version`.

use rusqlite::Connection;

use crate::error::StudyBuddyError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, StudyBuddyError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| StudyBuddyError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), StudyBuddyError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| StudyBuddyError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), StudyBuddyError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        tracing::info!(version, "applying database migration");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), StudyBuddyError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(StudyBuddyError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: completed session log.
fn migrate_v1(conn: &Connection) -> Result<(), StudyBuddyError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS completed_sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            session_type TEXT NOT NULL,
            duration_seconds INTEGER NOT NULL,
            completed_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_completed_sessions_completed
        ON completed_sessions(completed_at);
        ",
    )
    .map_err(|e| StudyBuddyError::Database(format!("Migration v1 failed: {e}")))
}
