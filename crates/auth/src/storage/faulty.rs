//! In-memory backend whose writes to chosen keys fail on demand.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::sync::Mutex;

use super::{KeyValueStore, MemoryStore, StorageError, StorageResult};

/// Wraps a [`MemoryStore`]; `set` and `remove` on a failing key return
/// `StorageError::Io` and leave the stored value untouched.
#[derive(Debug, Default)]
pub(crate) struct FaultyStore {
    inner: MemoryStore,
    failing: Mutex<HashSet<&'static str>>,
}

impl FaultyStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make writes to `key` fail until [`Self::heal`].
    pub(crate) fn fail_writes_to(&self, key: &'static str) {
        self.failing.lock().unwrap().insert(key);
    }

    pub(crate) fn heal(&self) {
        self.failing.lock().unwrap().clear();
    }

    fn check_write(&self, key: &str) -> StorageResult<()> {
        if self.failing.lock().unwrap().contains(key) {
            return Err(StorageError::io(
                format!("failed to write {key}"),
                std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            ));
        }
        Ok(())
    }
}

impl KeyValueStore for FaultyStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check_write(key)?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.check_write(key)?;
        self.inner.remove(key)
    }
}
