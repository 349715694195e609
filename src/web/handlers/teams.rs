//! Team profile and roster pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
};

use super::viewer_favorites;
use crate::api::middleware::CurrentUser;
use crate::domain::entities::{FavoriteKind, PlayerGroup};
use crate::state::AppState;
use crate::web::page::{Layout, PageError, PageResultExt, render};
use crate::web::views::{PlayerRow, TeamCard};

#[derive(Template, WebTemplate)]
#[template(path = "teams/show.html")]
struct TeamTemplate {
    layout: Layout,
    team: TeamCard,
}

#[derive(Template, WebTemplate)]
#[template(path = "teams/roster.html")]
struct RosterTemplate {
    layout: Layout,
    team: TeamCard,
    group: &'static str,
    players: Vec<PlayerRow>,
}

/// `GET /teams/{id}`
pub async fn team_show(
    State(st): State<AppState>,
    current: CurrentUser,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Response, PageError> {
    let layout = Layout::new(&current, &headers);
    let team = st.catalog_service.get_team(id).await.or_page(&layout)?;
    let favorites = viewer_favorites(&st, &current, FavoriteKind::Team)
        .await
        .or_page(&layout)?;

    Ok(render(TeamTemplate {
        layout,
        team: TeamCard::new(&team, &favorites),
    }))
}

async fn roster(
    st: AppState,
    current: CurrentUser,
    headers: HeaderMap,
    id: i64,
    group: PlayerGroup,
) -> Result<Response, PageError> {
    let layout = Layout::new(&current, &headers);
    let (team, players) = st.catalog_service.roster(id, group).await.or_page(&layout)?;
    let team_favorites = viewer_favorites(&st, &current, FavoriteKind::Team)
        .await
        .or_page(&layout)?;
    let player_favorites = viewer_favorites(&st, &current, FavoriteKind::Player)
        .await
        .or_page(&layout)?;

    Ok(render(RosterTemplate {
        layout,
        team: TeamCard::new(&team, &team_favorites),
        group: group.as_str(),
        players: PlayerRow::list(&players, &player_favorites),
    }))
}

/// `GET /teams/{id}/offense`
pub async fn team_offense(
    State(st): State<AppState>,
    current: CurrentUser,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Response, PageError> {
    roster(st, current, headers, id, PlayerGroup::Offense).await
}

/// `GET /teams/{id}/defense`
pub async fn team_defense(
    State(st): State<AppState>,
    current: CurrentUser,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Response, PageError> {
    roster(st, current, headers, id, PlayerGroup::Defense).await
}

/// `GET /teams/{id}/special-teams`
pub async fn team_special_teams(
    State(st): State<AppState>,
    current: CurrentUser,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Response, PageError> {
    roster(st, current, headers, id, PlayerGroup::SpecialTeams).await
}
