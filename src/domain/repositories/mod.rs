//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations. Implementations live in
//! `crate::infrastructure::persistence`; mocks are generated via `mockall` for
//! unit tests.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - User accounts
//! - [`TeamRepository`] - Teams and roster membership
//! - [`PlayerRepository`] - Players and roster groups
//! - [`FavoriteRepository`] - Favorite teams and players per user

pub mod favorite_repository;
pub mod player_repository;
pub mod team_repository;
pub mod user_repository;

pub use favorite_repository::FavoriteRepository;
pub use player_repository::PlayerRepository;
pub use team_repository::TeamRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use favorite_repository::MockFavoriteRepository;
#[cfg(test)]
pub use player_repository::MockPlayerRepository;
#[cfg(test)]
pub use team_repository::MockTeamRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
