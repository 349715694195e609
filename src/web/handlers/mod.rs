//! HTML page handlers.

mod auth;
mod home;
mod players;
mod teams;
mod users;

pub use auth::{login_page, login_submit, logout_handler, signup_page, signup_submit};
pub use home::home_handler;
pub use players::{player_show, players_index};
pub use teams::{team_defense, team_offense, team_show, team_special_teams};
pub use users::{delete_account, profile_page, profile_submit, user_players, user_show, users_index};

use std::collections::HashSet;

use crate::api::middleware::CurrentUser;
use crate::domain::entities::FavoriteKind;
use crate::error::AppError;
use crate::state::AppState;

/// Favorites of the viewer, used to color the heart buttons. Empty for
/// anonymous visitors.
async fn viewer_favorites(
    st: &AppState,
    current: &CurrentUser,
    kind: FavoriteKind,
) -> Result<HashSet<i64>, AppError> {
    match current.id() {
        Some(user_id) => st.favorite_service.favorite_ids(user_id, kind).await,
        None => Ok(HashSet::new()),
    }
}
