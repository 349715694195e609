//! Infrastructure layer for external integrations.
//!
//! Implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`cache`] - Statistics cache (Redis and no-op implementations)
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`sports_data`] - External sports-data provider client

pub mod cache;
pub mod persistence;
pub mod sports_data;
