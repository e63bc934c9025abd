use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::storage::{Storage, StorageError};

/// Keeps each slot in `<directory>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    directory: PathBuf
}

impl FileStorage {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into()
        }
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{key}.json"))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.slot_path(key);

        match fs::read(&path) {
            Ok(bytes) => {
                debug!("Read {} bytes from {}", bytes.len(), path.display());
                Ok(Some(bytes))
            },
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(classify(key, error))
        }
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.directory).map_err(|error| classify(key, error))?;

        let path = self.slot_path(key);

        //NOTE: The slot is replaced in one rename, an interrupted write leaves the previous content intact
        let mut staged = NamedTempFile::new_in(&self.directory).map_err(|error| classify(key, error))?;
        staged.write_all(bytes).map_err(|error| classify(key, error))?;
        staged.as_file().sync_all().map_err(|error| classify(key, error))?;
        staged.persist(&path).map_err(|error| classify(key, error.error))?;

        debug!("Wrote {} bytes to {}", bytes.len(), path.display());

        Ok(())
    }
}

fn classify(key: &str, error: io::Error) -> StorageError {
    match error.kind() {
        ErrorKind::PermissionDenied | ErrorKind::ReadOnlyFilesystem | ErrorKind::StorageFull => StorageError::Unavailable(key.to_string()),
        _ => StorageError::Io(error)
    }
}
