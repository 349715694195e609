//! Read access to teams, rosters and players.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{Player, PlayerGroup, Team};
use crate::domain::repositories::{PlayerRepository, TeamRepository};
use crate::error::AppError;

/// Service for browsing the imported catalog.
pub struct CatalogService {
    teams: Arc<dyn TeamRepository>,
    players: Arc<dyn PlayerRepository>,
}

impl CatalogService {
    pub fn new(teams: Arc<dyn TeamRepository>, players: Arc<dyn PlayerRepository>) -> Self {
        Self { teams, players }
    }

    /// All teams ordered by name.
    pub async fn list_teams(&self) -> Result<Vec<Team>, AppError> {
        self.teams.list_all().await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the team does not exist.
    pub async fn get_team(&self, id: i64) -> Result<Team, AppError> {
        self.teams
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Team not found", json!({"id": id})))
    }

    /// One roster group of a team, ordered by player name.
    pub async fn roster(
        &self,
        team_id: i64,
        group: PlayerGroup,
    ) -> Result<(Team, Vec<Player>), AppError> {
        let team = self.get_team(team_id).await?;
        let players = self.players.list_by_team(team.id, group).await?;
        Ok((team, players))
    }

    /// All players, or those whose name contains `query`.
    pub async fn list_players(&self, query: Option<&str>) -> Result<Vec<Player>, AppError> {
        match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(fragment) => self.players.search(fragment).await,
            None => self.players.list_all().await,
        }
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the player does not exist.
    pub async fn get_player(&self, id: i64) -> Result<Player, AppError> {
        self.players
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Player not found", json!({"id": id})))
    }

    /// A player and the team they are rostered on.
    pub async fn player_with_team(&self, id: i64) -> Result<(Player, Option<Team>), AppError> {
        let player = self.get_player(id).await?;
        let team = self.teams.find_by_player(player.id).await?;
        Ok((player, team))
    }

    /// Number of stored teams; doubles as a database liveness probe.
    pub async fn count_teams(&self) -> Result<i64, AppError> {
        self.teams.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::DEFAULT_IMAGE_URL;
    use crate::domain::repositories::{MockPlayerRepository, MockTeamRepository};

    fn test_team(id: i64) -> Team {
        Team {
            id,
            name: "Saints".to_string(),
            city: "New Orleans".to_string(),
            coach: "Dennis Allen".to_string(),
            owner: None,
            stadium: "Caesars Superdome".to_string(),
            established: Some(1967),
            lookup_id: Some(13),
            logo: DEFAULT_IMAGE_URL.to_string(),
        }
    }

    #[tokio::test]
    async fn test_roster_missing_team() {
        let mut teams = MockTeamRepository::new();
        teams.expect_find_by_id().returning(|_| Ok(None));

        let mut players = MockPlayerRepository::new();
        players.expect_list_by_team().times(0);

        let service = CatalogService::new(Arc::new(teams), Arc::new(players));

        let result = service.roster(5, PlayerGroup::Offense).await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_roster_passes_group() {
        let mut teams = MockTeamRepository::new();
        teams
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_team(id))));

        let mut players = MockPlayerRepository::new();
        players
            .expect_list_by_team()
            .withf(|team_id, group| *team_id == 5 && *group == PlayerGroup::SpecialTeams)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = CatalogService::new(Arc::new(teams), Arc::new(players));

        let (team, roster) = service.roster(5, PlayerGroup::SpecialTeams).await.unwrap();
        assert_eq!(team.id, 5);
        assert!(roster.is_empty());
    }

    #[tokio::test]
    async fn test_get_player_not_found() {
        let mut players = MockPlayerRepository::new();
        players.expect_find_by_id().returning(|_| Ok(None));

        let service = CatalogService::new(Arc::new(MockTeamRepository::new()), Arc::new(players));

        let err = service.player_with_team(3).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
