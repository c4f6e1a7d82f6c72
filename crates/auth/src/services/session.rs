//! Session manager.
//!
//! Tracks which account, if any, is logged in and mirrors that reference to
//! storage so it survives a restart.
//!
//! ```text
//! Anonymous --establish--> Authenticated(id)
//! Authenticated(id) --clear--> Anonymous
//! Anonymous --restore (valid ref)--> Authenticated(id)
//! Anonymous --restore (missing/dangling/malformed)--> Anonymous
//! ```

use std::sync::Arc;

use crowdcount_core::AccountId;

use crate::db::UserStore;
use crate::models::account::Account;
use crate::models::session::{Session, SessionState, keys};
use crate::storage::{KeyValueStore, StorageResult};

/// Owner of the current session.
pub struct SessionManager {
    kv: Arc<dyn KeyValueStore>,
    state: SessionState,
}

impl SessionManager {
    /// Create a manager in the `Anonymous` state.
    ///
    /// Nothing is read from storage until [`Self::restore`] runs.
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            state: SessionState::Anonymous,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// The logged-in account's ID, if any.
    #[must_use]
    pub const fn current_account_id(&self) -> Option<AccountId> {
        self.state.account_id()
    }

    /// Restore the session persisted by a previous run.
    ///
    /// The stored reference is only honoured if `users` still holds the
    /// account. A malformed or dangling reference is erased and the manager
    /// stays `Anonymous`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend read or the cleanup write fails.
    pub fn restore(&mut self, users: &UserStore) -> StorageResult<SessionState> {
        let Some(raw) = self.kv.get(keys::CURRENT_USER)? else {
            self.state = SessionState::Anonymous;
            return Ok(self.state);
        };

        let session = match serde_json::from_str::<Session>(&raw) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Stored session is malformed, clearing");
                self.clear()?;
                return Ok(self.state);
            }
        };

        if users.find_by_id(session.account_id).is_none() {
            tracing::warn!(
                account_id = %session.account_id,
                "Stored session references a missing account, clearing"
            );
            self.clear()?;
            return Ok(self.state);
        }

        tracing::debug!(account_id = %session.account_id, "Restored session");
        self.state = SessionState::Authenticated(session.account_id);
        Ok(self.state)
    }

    /// Make `account` the logged-in account and persist the reference.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the reference cannot be written; the state
    /// is unchanged in that case.
    pub fn establish(&mut self, account: &Account) -> StorageResult<()> {
        let raw = serde_json::to_string(&Session::new(account.id))?;
        self.kv.set(keys::CURRENT_USER, &raw)?;
        self.state = SessionState::Authenticated(account.id);
        Ok(())
    }

    /// End the current session and erase the persisted reference.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the reference cannot be removed. The
    /// in-process state is `Anonymous` regardless.
    pub fn clear(&mut self) -> StorageResult<()> {
        self.state = SessionState::Anonymous;
        self.kv.remove(keys::CURRENT_USER)
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
