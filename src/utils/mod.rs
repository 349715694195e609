//! Utility functions shared across layers.
//!
//! - [`cookies`] - Session cookie parsing and `Set-Cookie` values
//! - [`db_error`] - Database error inspection
//! - [`password`] - Argon2id password hashing

pub mod cookies;
pub mod db_error;
pub mod password;
