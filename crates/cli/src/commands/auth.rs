//! Account commands.
//!
//! # Usage
//!
//! ```bash
//! # Create an account (logs it in)
//! cc-cli register -u alice -e alice@example.com -p secret1 -c secret1
//!
//! # Log in with the seeded sample account
//! cc-cli login -e admin@crowdcount.com -p password123
//!
//! # Show who is logged in
//! cc-cli whoami
//!
//! # Log out
//! cc-cli logout
//! ```

use std::time::Duration;

use thiserror::Error;

use crowdcount_auth::config::ConfigError;
use crowdcount_auth::models::Account;
use crowdcount_auth::services::auth::AuthError;
use crowdcount_auth::state::AppState;
use crowdcount_auth::storage::StorageError;

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Login, registration or logout was rejected or failed.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Persisted state could not be opened.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CliError {
    /// Process exit status: 1 for input the user can correct, 2 otherwise.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Auth(e) if e.is_user_error() => 1,
            _ => 2,
        }
    }
}

/// What a command produced, rendered to stdout by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A success notification.
    Message(String),
    /// The current identity.
    Identity {
        /// Logged-in username.
        username: String,
        /// Logged-in email.
        email: String,
    },
    /// Nobody is logged in.
    Anonymous,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Message(message) => write!(f, "{message}"),
            Self::Identity { username, email } => write!(f, "Logged in as {username} <{email}>"),
            Self::Anonymous => write!(f, "Not logged in."),
        }
    }
}

/// Register a new account and log it in.
///
/// # Errors
///
/// Returns `CliError::Auth` if validation, uniqueness or storage fails.
pub async fn register(
    state: &mut AppState,
    latency: Duration,
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<Outcome, CliError> {
    simulate_latency(latency).await;
    let account = state
        .auth()
        .register(username, email, password, confirm_password)?;
    Ok(welcome("Registration successful!", &account))
}

/// Log in with email and password.
///
/// # Errors
///
/// Returns `CliError::Auth` if validation fails or the credentials don't match.
pub async fn login(
    state: &mut AppState,
    latency: Duration,
    email: &str,
    password: &str,
) -> Result<Outcome, CliError> {
    simulate_latency(latency).await;
    let account = state.auth().login(email, password)?;
    Ok(welcome("Login successful!", &account))
}

/// Log out the current account.
///
/// # Errors
///
/// Returns `CliError::Auth` if the persisted session cannot be erased.
pub fn logout(state: &mut AppState) -> Result<Outcome, CliError> {
    state.auth().logout()?;
    Ok(Outcome::Message("Logged out successfully!".to_owned()))
}

/// Describe the logged-in account.
#[must_use]
pub fn whoami(state: &AppState) -> Outcome {
    state
        .current_account()
        .map_or(Outcome::Anonymous, |account| Outcome::Identity {
            username: account.username.to_string(),
            email: account.email.to_string(),
        })
}

fn welcome(message: &str, account: &Account) -> Outcome {
    Outcome::Message(format!("{message} Welcome, {}.", account.username))
}

/// Stand-in for network latency; never affects the outcome.
async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tracing::debug!(?latency, "Simulating request latency");
        tokio::time::sleep(latency).await;
    }
}
