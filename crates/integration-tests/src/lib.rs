//! Integration tests for CrowdCount.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p crowdcount-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `auth_flow` - Register, login and logout across simulated restarts
//! - `persistence` - Behaviour when stored blobs are missing, malformed or tampered with
//!
//! Each test gets its own [`TestContext`], a temporary data directory that
//! plays the role of durable storage. "Restarting" means dropping the
//! [`AppState`] and opening a new one on the same directory.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use crowdcount_auth::config::AuthConfig;
use crowdcount_auth::state::AppState;
use crowdcount_auth::storage::{FileStore, KeyValueStore, StorageResult};

/// A throwaway data directory and the settings to open state on it.
pub struct TestContext {
    dir: TempDir,
    seed_sample_account: bool,
}

impl TestContext {
    /// Create a context with an empty data directory and seeding disabled.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
            seed_sample_account: false,
        }
    }

    /// Enable seeding of the sample account on first open.
    #[must_use]
    pub const fn with_sample_account(mut self) -> Self {
        self.seed_sample_account = true;
        self
    }

    /// The data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Configuration pointing at this context's data directory.
    #[must_use]
    pub fn config(&self) -> AuthConfig {
        AuthConfig {
            data_dir: self.dir.path().to_path_buf(),
            seed_sample_account: self.seed_sample_account,
            ..AuthConfig::default()
        }
    }

    /// Start a "process": open state on the data directory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the data directory cannot be read.
    pub fn start(&self) -> StorageResult<AppState> {
        AppState::open(&self.config())
    }

    /// Raw access to the stored blobs, bypassing the auth layer.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the data directory cannot be opened.
    pub fn raw_store(&self) -> StorageResult<Arc<dyn KeyValueStore>> {
        Ok(Arc::new(FileStore::open(self.dir.path())?))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
