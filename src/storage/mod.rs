mod errors;
mod export;
mod file_storage;
#[cfg(test)]
mod memory_storage;
mod persistence;

pub use errors::{PersistenceError, StorageError};
pub use export::write_csv;
pub use file_storage::FileStorage;
#[cfg(test)]
pub use memory_storage::MemoryStorage;
pub use persistence::{Persistence, DEFAULT_SLOT};

/// Durable key-value byte store. Each key names one slot.
pub trait Storage {
    /// Returns `Ok(None)` when the slot was never written.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
    /// Overwrites the slot unconditionally.
    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}
