//! Key-value snapshot storage.
//!
//! Application state lives in three slots, each holding one full JSON
//! snapshot. Stores only move strings; encoding is done by [`AppState`].
//!
//! [`AppState`]: crate::AppState

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// A named snapshot slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    User,
    Inspectors,
    History,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::User, Slot::Inspectors, Slot::History];

    /// Storage key of the slot.
    pub fn key(&self) -> &'static str {
        match self {
            Self::User => "ecoinspect_user",
            Self::Inspectors => "ecoinspect_inspectors",
            Self::History => "ecoinspect_history",
        }
    }
}

/// String-valued storage keyed by [`Slot`].
pub trait KeyValueStore {
    /// Read a slot. Absent slots are `Ok(None)`.
    fn get(&self, slot: Slot) -> Result<Option<String>>;

    /// Replace the full contents of a slot.
    fn set(&mut self, slot: Slot, value: &str) -> Result<()>;

    /// Delete a slot. Removing an absent slot is not an error.
    fn remove(&mut self, slot: Slot) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, slot: Slot) -> Result<Option<String>> {
        (**self).get(slot)
    }

    fn set(&mut self, slot: Slot, value: &str) -> Result<()> {
        (**self).set(slot, value)
    }

    fn remove(&mut self, slot: Slot) -> Result<()> {
        (**self).remove(slot)
    }
}
