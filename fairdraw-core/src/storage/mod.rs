//! SQLite persistence for draw history and saved item lists.
//!
//! The draw engine never touches storage; callers persist the proofs they
//! get back.

pub mod draw_store;
pub mod list_store;

pub use draw_store::{DrawHistory, DrawRecord, DrawStore};
pub use list_store::{ListStore, SavedList};

use crate::error::{DrawError, Result};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, MutexGuard};
use rusqlite::Connection;
use std::path::Path;

pub struct Storage {
    conn: Mutex<Connection>,
}

impl Storage {
    pub fn open(db_path: &Path) -> Result<Self> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DrawError::internal(format!("Failed to create directory: {}", e)))?;
        }

        let conn = Connection::open(db_path)?;
        Self::from_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.init_schema()?;
        Ok(storage)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock();

        // Draw history, one row per proof
        conn.execute(
            "CREATE TABLE IF NOT EXISTS draws (
                id TEXT PRIMARY KEY,
                kind TEXT NOT NULL,
                verification_code TEXT NOT NULL,
                hash TEXT NOT NULL,
                proof TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_draws_code ON draws (verification_code)",
            [],
        )?;
        conn.execute("CREATE INDEX IF NOT EXISTS idx_draws_hash ON draws (hash)", [])?;

        // Saved item lists
        conn.execute(
            "CREATE TABLE IF NOT EXISTS lists (
                id TEXT PRIMARY KEY,
                name TEXT UNIQUE NOT NULL,
                items TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    pub fn get_connection(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }

    pub fn draws(&self) -> DrawHistory<'_> {
        DrawHistory::new(self)
    }

    pub fn lists(&self) -> ListStore<'_> {
        ListStore::new(self)
    }
}

/// Convert a stored millisecond column back to a timestamp.
pub(crate) fn timestamp_from_millis(millis: i64, column: &str) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| DrawError::internal(format!("Invalid {} value {}", column, millis)))
}
