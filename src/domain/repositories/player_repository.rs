//! Repository trait for players.

use crate::domain::entities::{NewPlayer, Player, PlayerGroup};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for players.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn create(&self, new_player: NewPlayer) -> Result<Player, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Player>, AppError>;

    /// Lists every player ordered by name.
    async fn list_all(&self) -> Result<Vec<Player>, AppError>;

    /// Lists players whose name contains `fragment`.
    async fn search(&self, fragment: &str) -> Result<Vec<Player>, AppError>;

    /// Lists the players of one roster group on a team, ordered by name.
    async fn list_by_team(&self, team_id: i64, group: PlayerGroup)
    -> Result<Vec<Player>, AppError>;
}
