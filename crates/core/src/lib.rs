//! CrowdCount Core - Shared domain types.
//!
//! This crate provides the validated types used across all CrowdCount
//! components:
//! - `auth` - Account store, session manager and auth controller
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. Values
//! are validated on construction and on deserialization: an [`Email`] always
//! matches the address syntax and a [`Username`] always meets the minimum
//! length, whether parsed from input or read back from storage.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for account IDs, emails and usernames

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
