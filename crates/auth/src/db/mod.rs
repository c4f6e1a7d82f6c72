//! Account persistence.
//!
//! # Stored blobs
//!
//! - `crowdcount_users` - JSON array of every registered account, rewritten
//!   as a unit on each mutation
//!
//! The session reference lives under its own key and is owned by
//! [`crate::services::session::SessionManager`], not by this module.

pub mod users;

pub use users::UserStore;
