//! Data Transfer Objects for JSON responses.
//!
//! - [`favorite`] - Toggle endpoint response
//! - [`health`] - Health check response

pub mod favorite;
pub mod health;
