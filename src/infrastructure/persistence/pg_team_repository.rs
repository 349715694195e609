//! PostgreSQL implementation of the team repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::rows::{TEAM_COLUMNS, TeamRow, prefixed};
use crate::domain::entities::{DEFAULT_IMAGE_URL, NewTeam, Team};
use crate::domain::repositories::TeamRepository;
use crate::error::AppError;

/// PostgreSQL repository for teams and roster membership.
pub struct PgTeamRepository {
    pool: Arc<PgPool>,
}

impl PgTeamRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PgTeamRepository {
    async fn create(&self, new_team: NewTeam) -> Result<Team, AppError> {
        let sql = format!(
            "INSERT INTO teams (name, city, coach, owner, stadium, established, lookup_id, logo) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {TEAM_COLUMNS}"
        );

        let row = sqlx::query_as::<_, TeamRow>(&sql)
            .bind(&new_team.name)
            .bind(&new_team.city)
            .bind(&new_team.coach)
            .bind(&new_team.owner)
            .bind(&new_team.stadium)
            .bind(new_team.established)
            .bind(new_team.lookup_id)
            .bind(new_team.logo.as_deref().unwrap_or(DEFAULT_IMAGE_URL))
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Team>, AppError> {
        let sql = format!("SELECT {TEAM_COLUMNS} FROM teams WHERE id = $1");

        let row = sqlx::query_as::<_, TeamRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Team::from))
    }

    async fn list_all(&self) -> Result<Vec<Team>, AppError> {
        let sql = format!("SELECT {TEAM_COLUMNS} FROM teams ORDER BY name");

        let rows = sqlx::query_as::<_, TeamRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Team::from).collect())
    }

    async fn find_by_player(&self, player_id: i64) -> Result<Option<Team>, AppError> {
        // A player traded mid-season may be on two rosters; the first one wins.
        let sql = format!(
            "SELECT {cols} FROM teams t \
             JOIN team_players tp ON tp.team_id = t.id \
             WHERE tp.player_id = $1 ORDER BY t.id LIMIT 1",
            cols = prefixed("t", TEAM_COLUMNS)
        );

        let row = sqlx::query_as::<_, TeamRow>(&sql)
            .bind(player_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Team::from))
    }

    async fn add_player(&self, team_id: i64, player_id: i64) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO team_players (team_id, player_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(team_id)
        .bind(player_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teams")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn reset_catalog(&self) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM players").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM teams").execute(&mut *tx).await?;

        tx.commit().await?;
        Ok(())
    }
}
