//! PostgreSQL implementation of the player repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::rows::{PLAYER_COLUMNS, PlayerRow, like_pattern, prefixed};
use crate::domain::entities::{DEFAULT_IMAGE_URL, NewPlayer, Player, PlayerGroup};
use crate::domain::repositories::PlayerRepository;
use crate::error::AppError;

const UNKNOWN: &str = "Unknown";

/// PostgreSQL repository for players.
pub struct PgPlayerRepository {
    pool: Arc<PgPool>,
}

impl PgPlayerRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerRepository for PgPlayerRepository {
    async fn create(&self, p: NewPlayer) -> Result<Player, AppError> {
        let sql = format!(
            "INSERT INTO players (name, age, height, weight, college, player_group, position, \
             number, salary, seasons, image_url, lookup_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING {PLAYER_COLUMNS}"
        );

        let row = sqlx::query_as::<_, PlayerRow>(&sql)
            .bind(&p.name)
            .bind(p.age)
            .bind(p.height.as_deref().unwrap_or(UNKNOWN))
            .bind(p.weight.as_deref().unwrap_or(UNKNOWN))
            .bind(p.college.as_deref().unwrap_or(UNKNOWN))
            .bind(p.group.as_str())
            .bind(p.position.as_deref().unwrap_or(UNKNOWN))
            .bind(p.number)
            .bind(p.salary.as_deref().unwrap_or(UNKNOWN))
            .bind(p.seasons)
            .bind(p.image_url.as_deref().unwrap_or(DEFAULT_IMAGE_URL))
            .bind(p.lookup_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Player>, AppError> {
        let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = $1");

        let row = sqlx::query_as::<_, PlayerRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Player::from))
    }

    async fn list_all(&self) -> Result<Vec<Player>, AppError> {
        let sql = format!("SELECT {PLAYER_COLUMNS} FROM players ORDER BY name, id");

        let rows = sqlx::query_as::<_, PlayerRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Player::from).collect())
    }

    async fn search(&self, fragment: &str) -> Result<Vec<Player>, AppError> {
        let sql =
            format!("SELECT {PLAYER_COLUMNS} FROM players WHERE name ILIKE $1 ORDER BY name, id");

        let rows = sqlx::query_as::<_, PlayerRow>(&sql)
            .bind(like_pattern(fragment))
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Player::from).collect())
    }

    async fn list_by_team(
        &self,
        team_id: i64,
        group: PlayerGroup,
    ) -> Result<Vec<Player>, AppError> {
        let sql = format!(
            "SELECT {cols} FROM players p \
             JOIN team_players tp ON tp.player_id = p.id \
             WHERE tp.team_id = $1 AND p.player_group = $2 \
             ORDER BY p.name, p.id",
            cols = prefixed("p", PLAYER_COLUMNS)
        );

        let rows = sqlx::query_as::<_, PlayerRow>(&sql)
            .bind(team_id)
            .bind(group.as_str())
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Player::from).collect())
    }
}
