//! Repository trait for teams and their rosters.

use crate::domain::entities::{NewTeam, Team};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for teams.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Inserts a team.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a team with the same name or coach exists.
    async fn create(&self, new_team: NewTeam) -> Result<Team, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Team>, AppError>;

    /// Lists all teams ordered by name.
    async fn list_all(&self) -> Result<Vec<Team>, AppError>;

    /// Returns the team a player is rostered on, if any.
    async fn find_by_player(&self, player_id: i64) -> Result<Option<Team>, AppError>;

    /// Adds a player to a team roster. Adding twice is a no-op.
    async fn add_player(&self, team_id: i64, player_id: i64) -> Result<(), AppError>;

    /// Counts stored teams.
    async fn count(&self) -> Result<i64, AppError>;

    /// Removes every team and player, including rosters and favorites.
    async fn reset_catalog(&self) -> Result<(), AppError>;
}
