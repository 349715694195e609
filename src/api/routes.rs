//! Favorite toggle routes.

use crate::api::handlers::{toggle_favorite_player_handler, toggle_favorite_team_handler};
use crate::state::AppState;
use axum::{Router, routing::post};

/// Toggle endpoints. Authentication is checked by the handlers so that a
/// missing session yields `401` (or a redirect for browsers) instead of a
/// generic rejection.
///
/// # Endpoints
///
/// - `POST /users/toggle-favorite-team/{id}`
/// - `POST /users/toggle-favorite-player/{id}`
pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/toggle-favorite-team/{id}",
            post(toggle_favorite_team_handler),
        )
        .route(
            "/users/toggle-favorite-player/{id}",
            post(toggle_favorite_player_handler),
        )
}
