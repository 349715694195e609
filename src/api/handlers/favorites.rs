//! Handlers for the favorite toggle endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

use crate::api::dto::favorite::ToggleStatus;
use crate::api::middleware::CurrentUser;
use crate::domain::entities::FavoriteKind;
use crate::error::AppError;
use crate::state::AppState;

/// Toggles a team in the signed-in user's favorites.
///
/// # Endpoint
///
/// `POST /users/toggle-favorite-team/{id}`
///
/// # Response Codes
///
/// - **200 OK**: `{"kind":"team","id":42,"status":"added","favorite":true}`
/// - **303 See Other**: browser form post (`Accept: text/html`), back to the `Referer`
/// - **401 Unauthorized**: no session
/// - **404 Not Found**: unknown team
pub async fn toggle_favorite_team_handler(
    State(st): State<AppState>,
    current: CurrentUser,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    toggle(&st, &current, &headers, FavoriteKind::Team, id).await
}

/// Toggles a player in the signed-in user's favorites.
///
/// `POST /users/toggle-favorite-player/{id}`; responses as for teams.
pub async fn toggle_favorite_player_handler(
    State(st): State<AppState>,
    current: CurrentUser,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    toggle(&st, &current, &headers, FavoriteKind::Player, id).await
}

async fn toggle(
    st: &AppState,
    current: &CurrentUser,
    headers: &HeaderMap,
    kind: FavoriteKind,
    id: i64,
) -> Result<Response, AppError> {
    let html = wants_html(headers);

    let Some(user_id) = current.id() else {
        if html {
            return Ok(Redirect::to("/login").into_response());
        }
        return Err(AppError::unauthorized(
            "Unauthorized",
            json!({"reason": "Sign in to manage favorites"}),
        ));
    };

    let outcome = st.favorite_service.toggle(user_id, kind, id).await?;

    if html {
        return Ok(Redirect::to(&back_target(headers)).into_response());
    }

    Ok(Json(ToggleStatus::new(kind, id, outcome)).into_response())
}

/// Whether the client prefers an HTML page over JSON.
fn wants_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Local path to return a browser to after a form post.
///
/// Only the path and query of the `Referer` are kept, so the redirect never
/// leaves the site.
fn back_target(headers: &HeaderMap) -> String {
    let Some(referer) = headers.get(header::REFERER).and_then(|v| v.to_str().ok()) else {
        return "/".to_string();
    };

    if referer.starts_with('/') && !referer.starts_with("//") {
        return referer.to_string();
    }

    match url::Url::parse(referer) {
        Ok(url) => match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        },
        Err(_) => "/".to_string(),
    }
}
