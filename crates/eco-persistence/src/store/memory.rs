use std::collections::BTreeMap;

use super::{KeyValueStore, Slot};
use crate::error::Result;

/// In-memory store, used for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: BTreeMap<Slot, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a slot with raw contents.
    #[must_use]
    pub fn with_slot(mut self, slot: Slot, value: impl Into<String>) -> Self {
        self.slots.insert(slot, value.into());
        self
    }

    pub fn raw(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, slot: Slot) -> Result<Option<String>> {
        Ok(self.slots.get(&slot).cloned())
    }

    fn set(&mut self, slot: Slot, value: &str) -> Result<()> {
        self.slots.insert(slot, value.to_string());
        Ok(())
    }

    fn remove(&mut self, slot: Slot) -> Result<()> {
        self.slots.remove(&slot);
        Ok(())
    }
}
