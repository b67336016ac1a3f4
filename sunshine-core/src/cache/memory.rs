//! Volatile in-memory store

use core::cell::RefCell;

use crate::traits::{KeyValueStore, StorageKey, StoreError, StoredValue};

/// Store backed by a plain array, lost on restart
///
/// Single-context only (not `Sync`); the runtime uses its own store for
/// values shared between tasks.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RefCell<[Option<StoredValue>; StorageKey::COUNT]>,
    writes: RefCell<u32>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls
    pub fn write_count(&self) -> u32 {
        *self.writes.borrow()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: StorageKey) -> Result<Option<StoredValue>, StoreError> {
        Ok(self.slots.borrow()[key.as_u8() as usize].clone())
    }

    fn set(&self, key: StorageKey, value: StoredValue) -> Result<(), StoreError> {
        self.slots.borrow_mut()[key.as_u8() as usize] = Some(value);
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}
