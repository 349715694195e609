//! Repository trait for user favorites.

use crate::domain::entities::{FavoriteKind, Player, Team, ToggleOutcome};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the favorite-team and favorite-player relations.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgFavoriteRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Flips membership of `entity_id` in the user's favorites of `kind`.
    ///
    /// Implementations must perform the check and the write atomically.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn toggle(
        &self,
        user_id: i64,
        kind: FavoriteKind,
        entity_id: i64,
    ) -> Result<ToggleOutcome, AppError>;

    /// IDs of the user's favorites of `kind`.
    async fn favorite_ids(&self, user_id: i64, kind: FavoriteKind) -> Result<Vec<i64>, AppError>;

    /// The user's favorite teams ordered by name.
    async fn favorite_teams(&self, user_id: i64) -> Result<Vec<Team>, AppError>;

    /// The user's favorite players ordered by name.
    async fn favorite_players(&self, user_id: i64) -> Result<Vec<Player>, AppError>;
}
