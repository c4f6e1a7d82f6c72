//! Account domain types.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crowdcount_core::{AccountId, Email, Username};

/// A registered account.
///
/// Accounts are created by registration and never mutated afterwards. The
/// serialized field names match the stored JSON blob (`createdAt`).
///
/// Passwords are held and compared in plaintext; `Debug` output redacts them.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique account ID.
    pub id: AccountId,
    /// Unique, case-sensitive handle.
    pub username: Username,
    /// Unique email address, used to log in.
    pub email: Email,
    /// Plaintext password.
    pub password: String,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Returns `true` if both the email and password match exactly.
    #[must_use]
    pub fn matches_credentials(&self, email: &str, password: &str) -> bool {
        self.email == *email && self.password == password
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// A validated registration, ready to be assigned an ID and stored.
#[derive(Clone)]
pub struct NewAccount {
    /// Requested username.
    pub username: Username,
    /// Requested email.
    pub email: Email,
    /// Plaintext password.
    pub password: String,
}

impl NewAccount {
    /// The account seeded on first run so a fresh install can log in.
    ///
    /// Returns `None` only if the built-in values stop passing validation.
    #[must_use]
    pub fn sample() -> Option<Self> {
        Some(Self {
            username: Username::parse("admin").ok()?,
            email: Email::parse("admin@crowdcount.com").ok()?,
            password: "password123".to_owned(),
        })
    }
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
