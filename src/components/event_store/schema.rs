//! Connection bootstrap for the SQLite event database.
//!
//! Returned connections always have the `event` table in place.

use crate::error::AppResult;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Idempotent schema for the single `event` table
pub const CREATE_EVENT_TABLE_SQL: &str = r#"CREATE TABLE IF NOT EXISTS event (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    title NVARCHAR(100),
    start NVARCHAR(100),
    "end" NVARCHAR(100),
    allDay BOOLEAN NOT NULL CHECK (allDay IN (0, 1))
)"#;

/// Open (creating if needed) the database file and ensure the schema exists
pub fn open_db(path: impl AsRef<Path>) -> AppResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(path).map_err(|e| {
        error!("Failed to open event database {}: {}", path.display(), e);
        e
    })?;
    bootstrap_connection(&conn)?;

    info!(
        "Opened event database {} in {} ms",
        path.display(),
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

/// Open a private in-memory database with the schema applied
pub fn open_db_in_memory() -> AppResult<Connection> {
    let conn = Connection::open_in_memory()?;
    bootstrap_connection(&conn)?;
    info!("Opened in-memory event database");
    Ok(conn)
}

fn bootstrap_connection(conn: &Connection) -> AppResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    conn.execute_batch(CREATE_EVENT_TABLE_SQL)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_idempotent() {
        let conn = open_db_in_memory().unwrap();
        bootstrap_connection(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'event'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 1);
    }

    #[test]
    fn test_all_day_constraint() {
        let conn = open_db_in_memory().unwrap();
        let result = conn.execute(
            r#"INSERT INTO event (title, start, "end", allDay) VALUES ('x', 's', 'e', 2)"#,
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_open_db_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("schedule.sqlite3");

        let conn = open_db(&path).unwrap();
        drop(conn);

        assert!(path.exists());
    }
}
