//! Process-wide application state.
//!
//! Built once at startup: opens storage, loads the account store, seeds the
//! sample account on first run, and restores any persisted session. Request
//! handlers then borrow it through [`AppState::auth`].

use std::sync::Arc;

use crate::config::AuthConfig;
use crate::db::UserStore;
use crate::models::account::{Account, NewAccount};
use crate::models::session::SessionState;
use crate::services::auth::AuthController;
use crate::services::session::SessionManager;
use crate::storage::{FileStore, KeyValueStore, StorageResult};

/// The account store and session manager for one process.
#[derive(Debug)]
pub struct AppState {
    users: UserStore,
    sessions: SessionManager,
}

impl AppState {
    /// Open state backed by a [`FileStore`] in `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the data directory cannot be created or the
    /// persisted blobs cannot be read.
    pub fn open(config: &AuthConfig) -> StorageResult<Self> {
        let kv = Arc::new(FileStore::open(&config.data_dir)?);
        Self::with_store(kv, config.seed_sample_account)
    }

    /// Open state on any backend.
    ///
    /// # Arguments
    ///
    /// * `kv` - Storage shared by the account store and session manager
    /// * `seed_sample_account` - Create the sample account if none were ever stored
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    pub fn with_store(kv: Arc<dyn KeyValueStore>, seed_sample_account: bool) -> StorageResult<Self> {
        let mut users = UserStore::open(Arc::clone(&kv))?;

        if seed_sample_account && let Some(sample) = NewAccount::sample() {
            users.seed_if_absent(sample)?;
        }

        let mut sessions = SessionManager::new(kv);
        let restored = sessions.restore(&users)?;
        tracing::debug!(?restored, accounts = users.len(), "Application state ready");

        Ok(Self { users, sessions })
    }

    /// Borrow a controller for one request.
    pub fn auth(&mut self) -> AuthController<'_> {
        AuthController::new(&mut self.users, &mut self.sessions)
    }

    /// The account store.
    #[must_use]
    pub const fn users(&self) -> &UserStore {
        &self.users
    }

    /// Current session state.
    #[must_use]
    pub const fn session(&self) -> SessionState {
        self.sessions.state()
    }

    /// The logged-in account, if any.
    #[must_use]
    pub fn current_account(&self) -> Option<&Account> {
        self.sessions
            .current_account_id()
            .and_then(|id| self.users.find_by_id(id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crowdcount_core::AccountId;

    use super::*;
    use crate::models::session::keys;
    use crate::storage::MemoryStore;

    #[test]
    fn test_first_run_seeds_sample_account() {
        let state = AppState::with_store(Arc::new(MemoryStore::new()), true).unwrap();

        assert_eq!(state.users().len(), 1);
        assert_eq!(state.session(), SessionState::Anonymous);
    }

    #[test]
    fn test_seeding_can_be_disabled() {
        let state = AppState::with_store(Arc::new(MemoryStore::new()), false).unwrap();
        assert!(state.users().is_empty());
    }

    #[test]
    fn test_sample_account_can_log_in() {
        let mut state = AppState::with_store(Arc::new(MemoryStore::new()), true).unwrap();

        let admin = state
            .auth()
            .login("admin@crowdcount.com", "password123")
            .unwrap();

        assert_eq!(admin.id, AccountId::new(1));
        assert_eq!(state.current_account().map(|a| a.id), Some(admin.id));
    }

    #[test]
    fn test_restart_restores_session() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut first = AppState::with_store(Arc::clone(&kv), false).unwrap();
        let alice = first
            .auth()
            .register("alice", "a@b.com", "secret1", "secret1")
            .unwrap();
        drop(first);

        let second = AppState::with_store(kv, false).unwrap();
        assert_eq!(second.session(), SessionState::Authenticated(alice.id));
        assert_eq!(second.current_account().unwrap().username.as_str(), "alice");
    }

    #[test]
    fn test_restart_with_dangling_session_is_anonymous() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        kv.set(keys::CURRENT_USER, r#"{"id":7}"#).unwrap();

        let state = AppState::with_store(Arc::clone(&kv), true).unwrap();

        assert_eq!(state.session(), SessionState::Anonymous);
        assert!(!kv.contains(keys::CURRENT_USER).unwrap());
    }
}
