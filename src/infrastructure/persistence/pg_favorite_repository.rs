//! PostgreSQL implementation of the favorite repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::rows::{PLAYER_COLUMNS, PlayerRow, TEAM_COLUMNS, TeamRow, prefixed};
use crate::domain::entities::{FavoriteKind, Player, Team, ToggleOutcome};
use crate::domain::repositories::FavoriteRepository;
use crate::error::AppError;

/// Join table and entity column for a favorite kind.
fn relation(kind: FavoriteKind) -> (&'static str, &'static str) {
    match kind {
        FavoriteKind::Team => ("favorite_teams", "team_id"),
        FavoriteKind::Player => ("favorite_players", "player_id"),
    }
}

/// PostgreSQL repository for user favorites.
///
/// Toggling runs in a transaction: a delete that removes a row means the
/// favorite was present; otherwise the row is inserted. The user row is
/// locked first so overlapping toggles by one user run one after the other
/// and each reports the state it actually left behind.
pub struct PgFavoriteRepository {
    pool: Arc<PgPool>,
}

impl PgFavoriteRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepository for PgFavoriteRepository {
    async fn toggle(
        &self,
        user_id: i64,
        kind: FavoriteKind,
        entity_id: i64,
    ) -> Result<ToggleOutcome, AppError> {
        let (table, column) = relation(kind);
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let removed = sqlx::query(&format!(
            "DELETE FROM {table} WHERE user_id = $1 AND {column} = $2"
        ))
        .bind(user_id)
        .bind(entity_id)
        .execute(&mut *tx)
        .await?;

        let outcome = if removed.rows_affected() > 0 {
            ToggleOutcome::Removed
        } else {
            sqlx::query(&format!(
                "INSERT INTO {table} (user_id, {column}) VALUES ($1, $2) ON CONFLICT DO NOTHING"
            ))
            .bind(user_id)
            .bind(entity_id)
            .execute(&mut *tx)
            .await?;
            ToggleOutcome::Added
        };

        tx.commit().await?;
        Ok(outcome)
    }

    async fn favorite_ids(&self, user_id: i64, kind: FavoriteKind) -> Result<Vec<i64>, AppError> {
        let (table, column) = relation(kind);

        let ids: Vec<i64> = sqlx::query_scalar(&format!(
            "SELECT {column} FROM {table} WHERE user_id = $1 ORDER BY {column}"
        ))
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(ids)
    }

    async fn favorite_teams(&self, user_id: i64) -> Result<Vec<Team>, AppError> {
        let sql = format!(
            "SELECT {cols} FROM teams t \
             JOIN favorite_teams f ON f.team_id = t.id \
             WHERE f.user_id = $1 ORDER BY t.name",
            cols = prefixed("t", TEAM_COLUMNS)
        );

        let rows = sqlx::query_as::<_, TeamRow>(&sql)
            .bind(user_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Team::from).collect())
    }

    async fn favorite_players(&self, user_id: i64) -> Result<Vec<Player>, AppError> {
        let sql = format!(
            "SELECT {cols} FROM players p \
             JOIN favorite_players f ON f.player_id = p.id \
             WHERE f.user_id = $1 ORDER BY p.name, p.id",
            cols = prefixed("p", PLAYER_COLUMNS)
        );

        let rows = sqlx::query_as::<_, PlayerRow>(&sql)
            .bind(user_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Player::from).collect())
    }
}
