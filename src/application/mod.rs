//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation and external providers,
//! and give HTTP handlers and the admin CLI a single API.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Registration, login and session tokens
//! - [`services::user_service::UserService`] - Profiles, search, edits and deletion
//! - [`services::catalog_service::CatalogService`] - Teams, rosters and players
//! - [`services::favorite_service::FavoriteService`] - Favorite toggling
//! - [`services::stats_service::PlayerStatsService`] - Cached player statistics
//! - [`services::seed_service::SeedService`] - Catalog import

pub mod services;
