//! `SQLite` slot backend.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, warn};

use super::{migrations, SlotStore, StorageStats};
use crate::error::{Error, Result};

/// Slot backend persisted in a `SQLite` database.
///
/// Each slot is one row of the `slots` table. Values are stored verbatim.
#[derive(Debug)]
pub struct SqliteSlots {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl SqliteSlots {
    /// Open or create a slot database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist,
    /// and brings the schema up to date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory slot database.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let total_slots: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM slots", [], |row| row.get(0))?;

        let newest: Option<String> = self
            .conn
            .query_row(
                "SELECT updated_at FROM slots ORDER BY updated_at DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            total_slots,
            last_write: newest.as_deref().and_then(parse_timestamp),
            db_size_bytes,
        })
    }
}

impl SlotStore for SqliteSlots {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r"
            INSERT INTO slots (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        debug!("Wrote {} bytes to slot '{}'", value.len(), key);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        let affected = self.conn.execute("DELETE FROM slots WHERE key = ?1", [key])?;
        Ok(affected > 0)
    }

    fn last_written(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let stamp: Option<String> = self
            .conn
            .query_row(
                "SELECT updated_at FROM slots WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(stamp.as_deref().and_then(parse_timestamp))
    }
}

fn parse_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(stamp) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            warn!("Ignoring malformed slot timestamp '{}': {}", stamp, e);
            None
        }
    }
}
