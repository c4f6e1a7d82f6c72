//! Business logic services.
//!
//! - [`auth`] - Login, registration and logout
//! - [`session`] - Current-session ownership and restoration

pub mod auth;
pub mod session;
