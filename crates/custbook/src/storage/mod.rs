//! Storage layer for custbook.
//!
//! Persistence is a set of named slots, each holding one serialized value.
//! The customer store mirrors its whole collection into a single slot.

mod memory;
pub mod migrations;
pub mod schema;
mod sqlite;

use chrono::{DateTime, Utc};

use crate::error::Result;

pub use memory::MemorySlots;
pub use sqlite::SqliteSlots;

/// A durable key-value backend.
///
/// Writes replace the whole value of a slot. Implementations are synchronous;
/// a write has completed once the call returns.
pub trait SlotStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be queried.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the slot. Returns `true` if it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<bool>;

    /// When the slot was last written, if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be queried.
    fn last_written(&self, key: &str) -> Result<Option<DateTime<Utc>>>;
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of slots stored.
    pub total_slots: i64,
    /// Timestamp of the most recent write to any slot.
    pub last_write: Option<DateTime<Utc>>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}
