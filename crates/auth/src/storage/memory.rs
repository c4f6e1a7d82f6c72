//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{KeyValueStore, StorageError, StorageResult, is_valid_key};

/// Process-local store backed by a `HashMap`.
///
/// Contents vanish with the process. Tests that simulate a restart keep the
/// same `MemoryStore` (behind an `Arc`) and rebuild the stores on top of it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::LockPoisoned` if a writer panicked.
    pub fn len(&self) -> StorageResult<usize> {
        Ok(self
            .values
            .read()
            .map_err(|_| StorageError::LockPoisoned)?
            .len())
    }

    /// Returns `true` if no keys are held.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::LockPoisoned` if a writer panicked.
    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        check_key(key)?;
        let values = self.values.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        check_key(key)?;
        let mut values = self
            .values
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        check_key(key)?;
        let mut values = self
            .values
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        values.remove(key);
        Ok(())
    }

    fn contains(&self, key: &str) -> StorageResult<bool> {
        check_key(key)?;
        let values = self.values.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(values.contains_key(key))
    }
}

/// Apply the same key rules as [`super::FileStore`].
fn check_key(key: &str) -> StorageResult<()> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}
