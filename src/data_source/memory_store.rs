use std::sync::{Arc, Mutex};

use crate::data_source::{Snapshot, SnapshotStore, StoreError};

/// In-process store. Clones share the same slot, so a caller can keep a
/// handle and inspect what the ledger wrote.
#[derive(Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw serialized blob, if any.
    pub fn raw(&self) -> Option<String> {
        match self.slot.lock() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn with_slot<T>(&self, f: impl FnOnce(&mut Option<String>) -> T) -> T {
        match self.slot.lock() {
            Ok(mut slot) => f(&mut slot),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        match self.raw() {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let json = serde_json::to_string(snapshot)?;
        self.with_slot(|slot| *slot = Some(json));
        Ok(())
    }

    fn erase(&self) -> Result<(), StoreError> {
        self.with_slot(|slot| *slot = None);
        Ok(())
    }
}
