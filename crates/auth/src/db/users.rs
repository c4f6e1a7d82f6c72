//! Account store.
//!
//! This module owns the durable collection of registered accounts. The whole
//! collection is loaded once when the store is opened and written back as a
//! single blob after every mutation.

use std::sync::Arc;

use chrono::Utc;

use crowdcount_core::AccountId;

use crate::models::account::{Account, NewAccount};
use crate::models::session::keys;
use crate::storage::{KeyValueStore, StorageResult};

/// How the account blob looked when the store was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No blob was stored (first run).
    Missing,
    /// The blob was present but could not be parsed; the store starts empty.
    Malformed,
    /// The blob was parsed.
    Loaded,
}

/// Store for registered accounts.
pub struct UserStore {
    kv: Arc<dyn KeyValueStore>,
    accounts: Vec<Account>,
    load_outcome: LoadOutcome,
}

impl UserStore {
    /// Open the store, loading the account collection from `kv`.
    ///
    /// A malformed blob is treated as "no accounts" and logged; it is only
    /// overwritten by the next successful mutation.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend read fails.
    pub fn open(kv: Arc<dyn KeyValueStore>) -> StorageResult<Self> {
        let (accounts, load_outcome) = match kv.get(keys::USERS)? {
            None => (Vec::new(), LoadOutcome::Missing),
            Some(raw) => match serde_json::from_str::<Vec<Account>>(&raw) {
                Ok(accounts) => (accounts, LoadOutcome::Loaded),
                Err(e) => {
                    tracing::warn!(error = %e, "Stored accounts are malformed, starting empty");
                    (Vec::new(), LoadOutcome::Malformed)
                }
            },
        };

        tracing::debug!(count = accounts.len(), "Loaded accounts");

        Ok(Self {
            kv,
            accounts,
            load_outcome,
        })
    }

    /// How the account blob looked when the store was opened.
    #[must_use]
    pub const fn load_outcome(&self) -> LoadOutcome {
        self.load_outcome
    }

    /// Find the account whose email and password both match exactly.
    #[must_use]
    pub fn find_by_credentials(&self, email: &str, password: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.matches_credentials(email, password))
    }

    /// Find an account by ID.
    #[must_use]
    pub fn find_by_id(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Returns `true` if any account already uses `email` or `username`.
    #[must_use]
    pub fn exists_by_email_or_username(&self, email: &str, username: &str) -> bool {
        self.accounts
            .iter()
            .any(|a| a.email == *email || a.username == *username)
    }

    /// Store a new account and persist the collection.
    ///
    /// The ID is `count + 1`. Uniqueness of email and username is the
    /// caller's check; see [`Self::exists_by_email_or_username`].
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the collection cannot be written. The
    /// account is not retained in that case.
    pub fn add(&mut self, new: NewAccount) -> StorageResult<Account> {
        let account = Account {
            id: self.next_id(),
            username: new.username,
            email: new.email,
            password: new.password,
            created_at: Utc::now(),
        };

        self.accounts.push(account.clone());
        if let Err(e) = self.persist() {
            self.accounts.pop();
            return Err(e);
        }

        tracing::debug!(account_id = %account.id, "Stored account");
        Ok(account)
    }

    /// Undo an [`Self::add`] whose follow-up failed.
    ///
    /// Removes the account with `id` and rewrites the collection. The
    /// account is kept in memory if the write fails, so memory still
    /// matches storage.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the collection cannot be written.
    pub(crate) fn discard(&mut self, id: AccountId) -> StorageResult<()> {
        let Some(index) = self.accounts.iter().rposition(|a| a.id == id) else {
            return Ok(());
        };

        let removed = self.accounts.remove(index);
        if let Err(e) = self.persist() {
            self.accounts.insert(index, removed);
            return Err(e);
        }

        tracing::debug!(account_id = %id, "Discarded account");
        Ok(())
    }

    /// Seed `sample` if no account blob existed when the store was opened.
    ///
    /// A malformed blob does not count as missing and is left alone.
    ///
    /// # Returns
    ///
    /// The seeded account, or `None` if seeding did not apply.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the collection cannot be written.
    pub fn seed_if_absent(&mut self, sample: NewAccount) -> StorageResult<Option<Account>> {
        if self.load_outcome != LoadOutcome::Missing || !self.accounts.is_empty() {
            return Ok(None);
        }

        let account = self.add(sample)?;
        self.load_outcome = LoadOutcome::Loaded;
        tracing::info!(account_id = %account.id, "Seeded sample account");
        Ok(Some(account))
    }

    /// Number of stored accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns `true` if no accounts are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Iterate over accounts in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    /// `count + 1`, bumped past the highest stored ID if a hand-edited blob
    /// would otherwise make it collide.
    fn next_id(&self) -> AccountId {
        let by_count = AccountId::new(i32::try_from(self.accounts.len()).unwrap_or(i32::MAX));
        let highest = self.accounts.iter().map(|a| a.id).max();
        match highest {
            Some(max) if max > by_count => max.next(),
            _ => by_count.next(),
        }
    }

    fn persist(&self) -> StorageResult<()> {
        let raw = serde_json::to_string(&self.accounts)?;
        self.kv.set(keys::USERS, &raw)
    }
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore")
            .field("accounts", &self.accounts)
            .field("load_outcome", &self.load_outcome)
            .finish_non_exhaustive()
    }
}
