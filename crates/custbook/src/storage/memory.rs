//! In-memory slot backend.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::SlotStore;
use crate::error::Result;

/// Slot backend that keeps everything in a `HashMap`.
///
/// Nothing survives the process; used in tests and for throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemorySlots {
    slots: HashMap<String, (String, DateTime<Utc>)>,
    writes: usize,
}

impl MemorySlots {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes performed so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl SlotStore for MemorySlots {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).map(|(value, _)| value.clone()))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots
            .insert(key.to_string(), (value.to_string(), Utc::now()));
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        Ok(self.slots.remove(key).is_some())
    }

    fn last_written(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self.slots.get(key).map(|(_, at)| *at))
    }
}
