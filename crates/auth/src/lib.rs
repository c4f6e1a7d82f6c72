//! CrowdCount Auth - Local accounts and sessions.
//!
//! Registration, login and logout against an account collection persisted in
//! a key-value store, with the current session restored across restarts.
//!
//! # Architecture
//!
//! - [`storage`] - The key-value seam (`MemoryStore`, `FileStore`)
//! - [`db`] - `UserStore`, owner of the account collection
//! - [`services`] - `SessionManager` and `AuthController`
//! - [`state`] - Per-process wiring of the above
//!
//! The core is synchronous. Front ends that want latency or async handling
//! wrap these calls; nothing in this crate sleeps or spawns.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use crowdcount_auth::state::AppState;
//! use crowdcount_auth::storage::MemoryStore;
//!
//! let mut state = AppState::with_store(Arc::new(MemoryStore::new()), false)?;
//! let alice = state.auth().register("alice", "a@b.com", "secret1", "secret1")?;
//! assert_eq!(state.current_account(), Some(&alice));
//! # Ok::<(), crowdcount_auth::services::auth::AuthError>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
