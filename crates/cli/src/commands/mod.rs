//! Subcommand implementations.

pub mod auth;
