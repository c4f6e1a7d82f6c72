//! Authentication service.
//!
//! Validates login and registration requests, consults the account store,
//! and drives the session manager. Every expected failure comes back as an
//! [`AuthError`]; nothing here panics on bad input.

mod error;

pub use error::{AuthError, ValidationError};

use crowdcount_core::types::text;
use crowdcount_core::{Email, Username};

use crate::db::UserStore;
use crate::models::account::{Account, NewAccount};
use crate::services::session::SessionManager;

/// Minimum password length, in characters.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Authentication controller.
///
/// Borrows the process-wide account store and session manager for the
/// duration of a request.
pub struct AuthController<'a> {
    users: &'a mut UserStore,
    sessions: &'a mut SessionManager,
}

impl<'a> AuthController<'a> {
    /// Create a controller over the given store and session manager.
    #[must_use]
    pub const fn new(users: &'a mut UserStore, sessions: &'a mut SessionManager) -> Self {
        Self { users, sessions }
    }

    /// Log in with email and password.
    ///
    /// Surrounding whitespace is trimmed from the email, never from the
    /// password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if a field is empty or the email is
    /// malformed.
    /// Returns `AuthError::InvalidCredentials` if no account matches.
    /// Returns `AuthError::Storage` if the session cannot be persisted.
    pub fn login(&mut self, email: &str, password: &str) -> Result<Account, AuthError> {
        let email = text::trim(email);

        if email.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingFields.into());
        }

        if !Email::is_valid(email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        let account = self
            .users
            .find_by_credentials(email, password)
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?;

        self.sessions.establish(&account)?;

        tracing::info!(account_id = %account.id, "Login successful");
        Ok(account)
    }

    /// Register a new account and log it in.
    ///
    /// Checks run in a fixed order and stop at the first failure: all fields
    /// present, username length, email syntax, password length, confirmation
    /// match, then uniqueness.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` for the first rule the input breaks.
    /// Returns `AuthError::DuplicateUser` if the email or username is taken.
    /// Returns `AuthError::Storage` if the account or session cannot be
    /// persisted. Nothing is stored in that case.
    pub fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Account, AuthError> {
        let new = validate_registration(username, email, password, confirm_password)?;

        if self
            .users
            .exists_by_email_or_username(new.email.as_str(), new.username.as_str())
        {
            return Err(AuthError::DuplicateUser);
        }

        let account = self.users.add(new)?;
        if let Err(e) = self.sessions.establish(&account) {
            if let Err(rollback) = self.users.discard(account.id) {
                tracing::error!(
                    account_id = %account.id,
                    error = %rollback,
                    "Failed to roll back account after session write failure"
                );
            }
            return Err(e.into());
        }

        tracing::info!(account_id = %account.id, "Registration successful");
        Ok(account)
    }

    /// Log out, whatever the current state.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the persisted session cannot be erased.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        let previous = self.sessions.current_account_id();
        self.sessions.clear()?;

        if let Some(account_id) = previous {
            tracing::info!(%account_id, "Logged out");
        }
        Ok(())
    }

    /// The logged-in account, if any.
    #[must_use]
    pub fn current_account(&self) -> Option<&Account> {
        self.sessions
            .current_account_id()
            .and_then(|id| self.users.find_by_id(id))
    }
}

/// Validate registration input in the fixed rule order.
fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<NewAccount, ValidationError> {
    let username = text::trim(username);
    let email = text::trim(email);

    if username.is_empty() || email.is_empty() || password.is_empty() || confirm_password.is_empty()
    {
        return Err(ValidationError::MissingFields);
    }

    let username = Username::parse(username).map_err(|_| ValidationError::UsernameTooShort)?;
    let email = Email::parse(email).map_err(|_| ValidationError::InvalidEmail)?;

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }

    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }

    Ok(NewAccount {
        username,
        email,
        password: password.to_owned(),
    })
}
