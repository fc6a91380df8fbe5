// src/db.rs
// SQLite-backed user record store

use crate::error::Result;
use crate::store::{UserRecord, UserStore};
use crate::types;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::Mutex;

/// Database wrapper around a single rusqlite connection
pub struct Database {
    conn: Mutex<Connection>,
    path: Option<String>,
}

impl Database {
    /// Open database at path, creating if needed
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrency
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

        let db = Self {
            conn: Mutex::new(conn),
            path: Some(path.to_string_lossy().into_owned()),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Open in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;

        let db = Self {
            conn: Mutex::new(conn),
            path: None,
        };
        db.init_schema()?;
        Ok(db)
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get a lock on the connection
    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("Database mutex poisoned")
    }

    /// Initialize schema (idempotent)
    fn init_schema(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    email TEXT UNIQUE NOT NULL,
    token TEXT NOT NULL,
    person_id INTEGER NOT NULL,
    initialized_at TEXT NOT NULL
);
"#;

impl UserStore for Database {
    fn create(&self, record: &UserRecord) -> Result<UserRecord> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO users (email, token, person_id, initialized_at) VALUES (?, ?, ?, ?)",
            params![
                record.email,
                record.token,
                record.person_id,
                types::format_timestamp(&record.initialized_at),
            ],
        )?;
        Ok(record.clone())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let conn = self.conn();
        let row: Option<(String, String, i64, String)> = conn
            .query_row(
                "SELECT email, token, person_id, initialized_at FROM users WHERE email = ?",
                [email],
                |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
                },
            )
            .optional()?;

        match row {
            Some((email, token, person_id, initialized_at)) => Ok(Some(UserRecord {
                email,
                token,
                person_id,
                initialized_at: types::parse_timestamp(&initialized_at)?,
            })),
            None => Ok(None),
        }
    }

    fn update(&self, record: &UserRecord) -> Result<UserRecord> {
        let conn = self.conn();
        let changed = conn.execute(
            "UPDATE users SET token = ?, initialized_at = ? WHERE email = ?",
            params![
                record.token,
                types::format_timestamp(&record.initialized_at),
                record.email,
            ],
        )?;

        if changed == 0 {
            return Err(rusqlite::Error::QueryReturnedNoRows.into());
        }
        Ok(record.clone())
    }
}
