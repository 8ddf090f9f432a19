//! File-backed store
//!
//! ```text
//! {storage_dir}/
//! ├── access_token
//! ├── refresh_token
//! ├── user_role
//! ├── user_profile          # JSON
//! └── form_configurations   # JSON
//! ```

use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError, StorageResult, validate_key};

/// One file per key under a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the store directory
    pub fn open(dir: impl AsRef<Path>) -> StorageResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let value = std::fs::read_to_string(&path).map_err(|source| StorageError::Read {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path(key)?;
        // Write-then-rename so a failed write leaves the previous value intact
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, value)
            .and_then(|_| std::fs::rename(&tmp, &path))
            .map_err(|source| StorageError::Write {
                key: key.to_string(),
                source,
            })?;
        tracing::debug!(key = %key, bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path(key)?;
        if path.exists() {
            std::fs::remove_file(&path).map_err(|source| StorageError::Write {
                key: key.to_string(),
                source,
            })?;
            tracing::debug!(key = %key, "Removed value");
        }
        Ok(())
    }
}
