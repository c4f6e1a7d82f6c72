//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// A rejected input, in the order the checks run.
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields are empty.
    #[error("Please fill in all fields.")]
    MissingFields,

    /// Username is shorter than the minimum length.
    #[error("Username must be at least 3 characters long.")]
    UsernameTooShort,

    /// Email does not look like `name@domain.tld`.
    #[error("Please enter a valid email address.")]
    InvalidEmail,

    /// Password is shorter than the minimum length.
    #[error("Password must be at least 6 characters long.")]
    PasswordTooShort,

    /// Password and confirmation differ.
    #[error("Passwords do not match.")]
    PasswordMismatch,
}

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No account matches the email and password.
    #[error("Invalid email or password.")]
    InvalidCredentials,

    /// An account already uses the email or username.
    #[error("User with this email or username already exists.")]
    DuplicateUser,

    /// Persisted state could not be read or written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Returns `true` for outcomes the user can fix by changing their input.
    ///
    /// Storage failures are the only variant that is not.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }

    /// The validation failure, if this is one.
    #[must_use]
    pub const fn validation(&self) -> Option<ValidationError> {
        match self {
            Self::Validation(v) => Some(*v),
            _ => None,
        }
    }
}
