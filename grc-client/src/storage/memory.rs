//! In-memory store

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{KeyValueStore, StorageError, StorageResult, validate_key};

/// Process-local map
///
/// `set_fail_writes(true)` makes every `set`/`remove` fail with
/// [`StorageError::WriteRejected`] until switched back. `reject_key` does
/// the same for `set` on a single key only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    fail_writes: AtomicBool,
    rejected_keys: RwLock<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Reject every later `set` of `key`
    pub fn reject_key(&self, key: &str) {
        self.rejected_keys
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_writable(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::WriteRejected(format!("store is read-only ({})", key)));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check_writable(key)?;
        let rejected = self
            .rejected_keys
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains(key);
        if rejected {
            return Err(StorageError::WriteRejected(key.to_string()));
        }
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.check_writable(key)?;
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}
