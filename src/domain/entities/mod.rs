//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without persistence concerns.
//!
//! # Entity Types
//!
//! - [`User`] - A registered fan account
//! - [`Team`] - A team and its metadata
//! - [`Player`] - A rostered player, grouped by [`PlayerGroup`]
//! - [`FavoriteKind`] / [`ToggleOutcome`] - Favorite toggling vocabulary
//!
//! Separate `New*` structs are used for inserts and `UpdateUser` for profile edits.

pub mod favorite;
pub mod player;
pub mod team;
pub mod user;

pub use favorite::{FavoriteKind, ToggleOutcome};
pub use player::{NewPlayer, Player, PlayerGroup};
pub use team::{NewTeam, Team};
pub use user::{DEFAULT_IMAGE_URL, NewUser, UpdateUser, User};
