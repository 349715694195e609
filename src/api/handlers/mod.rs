//! HTTP request handlers for API endpoints.

pub mod favorites;
pub mod health;

pub use favorites::{toggle_favorite_player_handler, toggle_favorite_team_handler};
pub use health::health_handler;
