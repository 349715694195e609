//! User profiles, search, edits and deletion.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{Player, PlayerGroup, Team, UpdateUser, User};
use crate::domain::repositories::{FavoriteRepository, UserRepository};
use crate::error::AppError;
use crate::utils::password;

/// A user together with their favorite teams.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user: User,
    pub favorite_teams: Vec<Team>,
}

/// Favorite players split by roster group.
///
/// Players in [`PlayerGroup::Unknown`] are not shown on any of the three lists.
#[derive(Debug, Clone, Default)]
pub struct GroupedPlayers {
    pub offense: Vec<Player>,
    pub defense: Vec<Player>,
    pub special_teams: Vec<Player>,
}

impl GroupedPlayers {
    pub fn from_players(players: Vec<Player>) -> Self {
        let mut grouped = Self::default();
        for player in players {
            match player.group {
                PlayerGroup::Offense => grouped.offense.push(player),
                PlayerGroup::Defense => grouped.defense.push(player),
                PlayerGroup::SpecialTeams => grouped.special_teams.push(player),
                PlayerGroup::Unknown => {}
            }
        }
        grouped
    }
}

/// Service for user-facing account operations.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    favorites: Arc<dyn FavoriteRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, favorites: Arc<dyn FavoriteRepository>) -> Self {
        Self { users, favorites }
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn get_user(&self, id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({"id": id})))
    }

    /// Lists all users, or those whose username contains `query`.
    pub async fn list_users(&self, query: Option<&str>) -> Result<Vec<User>, AppError> {
        match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(fragment) => self.users.search(fragment).await,
            None => self.users.list_all().await,
        }
    }

    /// Loads a user's profile page data.
    pub async fn profile(&self, id: i64) -> Result<UserProfile, AppError> {
        let user = self.get_user(id).await?;
        let favorite_teams = self.favorites.favorite_teams(user.id).await?;

        Ok(UserProfile {
            user,
            favorite_teams,
        })
    }

    /// Loads a user's favorite players grouped for display.
    pub async fn favorite_players(&self, id: i64) -> Result<(User, GroupedPlayers), AppError> {
        let user = self.get_user(id).await?;
        let players = self.favorites.favorite_players(user.id).await?;

        Ok((user, GroupedPlayers::from_players(players)))
    }

    /// Updates profile fields after re-checking the current password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the password is wrong.
    /// Returns [`AppError::Conflict`] if the username or email is taken.
    pub async fn update_profile(
        &self,
        user: &User,
        current_password: &str,
        update: UpdateUser,
    ) -> Result<User, AppError> {
        let valid =
            password::verify_password(current_password.to_string(), user.password_hash.clone())
                .await
                .map_err(|e| {
                    AppError::internal(
                        "Password verification failed",
                        json!({"reason": e.to_string()}),
                    )
                })?;

        if !valid {
            return Err(AppError::unauthorized(
                "Invalid credentials",
                json!({"reason": "Current password does not match"}),
            ));
        }

        let updated = self.users.update(user.id, update).await?;
        tracing::info!(user_id = updated.id, "Profile updated");
        Ok(updated)
    }

    /// Deletes a user and, by cascade, their favorites.
    pub async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        self.users.delete(id).await?;
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}
