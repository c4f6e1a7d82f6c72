//! Domain models for the auth layer.
//!
//! - [`account`] - Registered accounts as owned by the account store
//! - [`session`] - The persisted session reference and in-process session state

pub mod account;
pub mod session;

pub use account::{Account, NewAccount};
pub use session::{Session, SessionState};
