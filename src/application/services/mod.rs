//! Business logic services for the application layer.

pub mod auth_service;
pub mod catalog_service;
pub mod favorite_service;
pub mod seed_service;
pub mod stats_service;
pub mod user_service;

pub use auth_service::{AuthService, Registration};
pub use catalog_service::CatalogService;
pub use favorite_service::FavoriteService;
pub use seed_service::{SeedOptions, SeedReport, SeedService};
pub use stats_service::PlayerStatsService;
pub use user_service::{GroupedPlayers, UserProfile, UserService};
