//! Favorite toggling for teams and players.

use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::entities::{FavoriteKind, ToggleOutcome};
use crate::domain::repositories::{FavoriteRepository, PlayerRepository, TeamRepository};
use crate::error::AppError;

/// Service that flips favorite membership for a signed-in user.
///
/// Each toggle is checked against the catalog first so unknown ids yield
/// [`AppError::NotFound`] instead of a foreign-key failure.
pub struct FavoriteService {
    favorites: Arc<dyn FavoriteRepository>,
    teams: Arc<dyn TeamRepository>,
    players: Arc<dyn PlayerRepository>,
}

impl FavoriteService {
    pub fn new(
        favorites: Arc<dyn FavoriteRepository>,
        teams: Arc<dyn TeamRepository>,
        players: Arc<dyn PlayerRepository>,
    ) -> Self {
        Self {
            favorites,
            teams,
            players,
        }
    }

    /// Toggles `entity_id` in the user's favorites of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the team or player does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn toggle(
        &self,
        user_id: i64,
        kind: FavoriteKind,
        entity_id: i64,
    ) -> Result<ToggleOutcome, AppError> {
        let exists = match kind {
            FavoriteKind::Team => self.teams.find_by_id(entity_id).await?.is_some(),
            FavoriteKind::Player => self.players.find_by_id(entity_id).await?.is_some(),
        };

        if !exists {
            return Err(AppError::not_found(
                format!("{} not found", capitalized(kind)),
                json!({"kind": kind, "id": entity_id}),
            ));
        }

        let outcome = self.favorites.toggle(user_id, kind, entity_id).await?;

        metrics::counter!(
            "favorite_toggles_total",
            "kind" => kind.as_str(),
            "status" => outcome.as_str()
        )
        .increment(1);

        tracing::info!(
            user_id,
            kind = %kind,
            entity_id,
            status = outcome.as_str(),
            "Favorite toggled"
        );

        Ok(outcome)
    }

    /// IDs of the user's favorites of `kind`, for rendering button states.
    pub async fn favorite_ids(
        &self,
        user_id: i64,
        kind: FavoriteKind,
    ) -> Result<HashSet<i64>, AppError> {
        Ok(self
            .favorites
            .favorite_ids(user_id, kind)
            .await?
            .into_iter()
            .collect())
    }
}

fn capitalized(kind: FavoriteKind) -> &'static str {
    match kind {
        FavoriteKind::Team => "Team",
        FavoriteKind::Player => "Player",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{DEFAULT_IMAGE_URL, Team};
    use crate::domain::repositories::{
        MockFavoriteRepository, MockPlayerRepository, MockTeamRepository,
    };

    fn test_team(id: i64) -> Team {
        Team {
            id,
            name: "Bears".to_string(),
            city: "Chicago".to_string(),
            coach: "Matt Eberflus".to_string(),
            owner: Some("Virginia Halas McCaskey".to_string()),
            stadium: "Soldier Field".to_string(),
            established: Some(1920),
            lookup_id: Some(16),
            logo: DEFAULT_IMAGE_URL.to_string(),
        }
    }

    #[tokio::test]
    async fn test_toggle_unknown_player() {
        let mut players = MockPlayerRepository::new();
        players.expect_find_by_id().returning(|_| Ok(None));

        let mut favorites = MockFavoriteRepository::new();
        favorites.expect_toggle().times(0);

        let service = FavoriteService::new(
            Arc::new(favorites),
            Arc::new(MockTeamRepository::new()),
            Arc::new(players),
        );

        let err = service
            .toggle(1, FavoriteKind::Player, 999)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "Player not found");
    }

    #[tokio::test]
    async fn test_toggle_team_delegates_to_repository() {
        let mut teams = MockTeamRepository::new();
        teams
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_team(id))));

        let mut favorites = MockFavoriteRepository::new();
        favorites
            .expect_toggle()
            .withf(|user_id, kind, id| *user_id == 1 && *kind == FavoriteKind::Team && *id == 42)
            .times(1)
            .returning(|_, _, _| Ok(ToggleOutcome::Added));

        let service = FavoriteService::new(
            Arc::new(favorites),
            Arc::new(teams),
            Arc::new(MockPlayerRepository::new()),
        );

        let outcome = service.toggle(1, FavoriteKind::Team, 42).await.unwrap();
        assert_eq!(outcome, ToggleOutcome::Added);
    }

    #[tokio::test]
    async fn test_favorite_ids_deduplicates() {
        let mut favorites = MockFavoriteRepository::new();
        favorites
            .expect_favorite_ids()
            .returning(|_, _| Ok(vec![3, 5, 3]));

        let service = FavoriteService::new(
            Arc::new(favorites),
            Arc::new(MockTeamRepository::new()),
            Arc::new(MockPlayerRepository::new()),
        );

        let ids = service.favorite_ids(1, FavoriteKind::Team).await.unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&3) && ids.contains(&5));
    }
}
