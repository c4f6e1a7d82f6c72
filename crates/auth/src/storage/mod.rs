//! Key-value persistence for account and session blobs.
//!
//! Everything the auth layer persists is a JSON string stored under a fixed
//! key (see [`crate::models::session::keys`]). Values are always replaced as
//! a whole; there are no partial writes and no versioning.
//!
//! # Backends
//!
//! - [`MemoryStore`] - process-local, used by tests and ephemeral runs
//! - [`FileStore`] - one file per key under a data directory, atomic writes

mod file;
mod memory;

#[cfg(test)]
pub(crate) mod faulty;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while reading or writing persisted blobs.
///
/// Malformed *content* is not a storage error; callers decide how to treat
/// data that fails to deserialize. These variants cover the backend itself
/// failing.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O operation failed.
    #[error("{context}: {source}")]
    Io {
        /// Context describing the operation.
        context: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A value could not be serialized before writing.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The key contains characters the backend cannot store.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A lock guarding in-memory state was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    LockPoisoned,
}

impl StorageError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// String-valued key-value storage.
///
/// Methods take `&self`; implementations use interior mutability so one
/// backend can be shared between the account store and the session manager.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend fails. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. On error the previous value, if
    /// any, is left intact.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend fails.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Checks whether `key` holds a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails.
    fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Returns `true` if `key` is safe to use as a file stem on every platform.
pub(crate) fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_keys() {
        assert!(is_valid_key("crowdcount_users"));
        assert!(is_valid_key("crowdcount-current-user"));
        assert!(is_valid_key("k1"));
    }

    #[test]
    fn test_invalid_keys() {
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("../etc/passwd"));
        assert!(!is_valid_key("a/b"));
        assert!(!is_valid_key("with space"));
        assert!(!is_valid_key("dot.json"));
    }
}
