//! Session-related types.
//!
//! Types persisted to identify the logged-in account across restarts.

use serde::{Deserialize, Serialize};

use crowdcount_core::AccountId;

/// Persisted session reference.
///
/// Holds only the account ID, never a copy of the account. Stored as
/// `{"id": <n>}`; extra fields are ignored, so a blob that carries a full
/// account object still identifies its account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The authenticated account.
    #[serde(rename = "id")]
    pub account_id: AccountId,
}

impl Session {
    /// Create a session referencing `account_id`.
    #[must_use]
    pub const fn new(account_id: AccountId) -> Self {
        Self { account_id }
    }
}

/// In-process authentication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No account is logged in.
    #[default]
    Anonymous,
    /// The given account is logged in.
    Authenticated(AccountId),
}

impl SessionState {
    /// Returns `true` if an account is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The logged-in account, if any.
    #[must_use]
    pub const fn account_id(&self) -> Option<AccountId> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(id) => Some(*id),
        }
    }
}

/// Storage keys for the persisted blobs.
pub mod keys {
    /// Key for the serialized account collection.
    pub const USERS: &str = "crowdcount_users";

    /// Key for the current session reference.
    pub const CURRENT_USER: &str = "crowdcount_current_user";
}
