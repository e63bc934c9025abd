use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::storage::{Storage, StorageError};

/// In-process slots, used by tests.
///
/// `set_fail_writes(true)` makes every `save` fail the way a full or disabled
/// browser store would, leaving the previous slot content untouched.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RefCell<HashMap<String, Vec<u8>>>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(key: &str, bytes: &[u8]) -> Self {
        let storage = Self::new();
        storage.slots.borrow_mut().insert(key.to_string(), bytes.to_vec());
        storage
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn slot(&self, key: &str) -> Option<Vec<u8>> {
        self.slots.borrow().get(key).cloned()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.slot(key))
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Unavailable(key.to_string()));
        }

        self.slots.borrow_mut().insert(key.to_string(), bytes.to_vec());
        self.writes.set(self.writes.get() + 1);

        Ok(())
    }
}
