use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage error: {0}")]
    Io(#[from] io::Error),
    #[error("Storage error: slot [{0}] is unavailable")]
    Unavailable(String)
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Persistence error: {0}")]
    Storage(#[from] StorageError),
    #[error("Persistence error: {0}")]
    Serialize(#[from] serde_json::Error)
}
