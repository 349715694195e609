//! Web page route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    delete_account, home_handler, login_page, login_submit, logout_handler, player_show,
    players_index, profile_page, profile_submit, signup_page, signup_submit, team_defense,
    team_offense, team_show, team_special_teams, user_players, user_show, users_index,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Every HTML page. Pages that need a user check the session themselves and
/// redirect with a message otherwise.
///
/// # Endpoints
///
/// - `GET /` - All teams
/// - `GET|POST /signup`, `GET|POST /login`, `GET /logout`
/// - `GET /users?q=`, `GET /users/{id}`, `GET /users/{id}/players`
/// - `GET|POST /users/profile`, `POST /users/delete`
/// - `GET /teams/{id}` and `/offense`, `/defense`, `/special-teams`
/// - `GET /players?q=`, `GET /players/{id}`
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/signup", get(signup_page).post(signup_submit))
        .route("/login", get(login_page).post(login_submit))
        .route("/logout", get(logout_handler))
        .route("/users", get(users_index))
        .route("/users/profile", get(profile_page).post(profile_submit))
        .route("/users/delete", post(delete_account))
        .route("/users/{id}", get(user_show))
        .route("/users/{id}/players", get(user_players))
        .route("/teams/{id}", get(team_show))
        .route("/teams/{id}/offense", get(team_offense))
        .route("/teams/{id}/defense", get(team_defense))
        .route("/teams/{id}/special-teams", get(team_special_teams))
        .route("/players", get(players_index))
        .route("/players/{id}", get(player_show))
}
