//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Queries are
//! checked at runtime and decoded through the `FromRow` types in `rows`.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - User accounts
//! - [`PgTeamRepository`] - Teams and rosters
//! - [`PgPlayerRepository`] - Players
//! - [`PgFavoriteRepository`] - Favorite teams and players

pub mod pg_favorite_repository;
pub mod pg_player_repository;
pub mod pg_team_repository;
pub mod pg_user_repository;
mod rows;

pub use pg_favorite_repository::PgFavoriteRepository;
pub use pg_player_repository::PgPlayerRepository;
pub use pg_team_repository::PgTeamRepository;
pub use pg_user_repository::PgUserRepository;
