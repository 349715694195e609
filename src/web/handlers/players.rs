//! Player directory and player profile with season statistics.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Response,
};

use super::viewer_favorites;
use crate::api::middleware::CurrentUser;
use crate::domain::entities::FavoriteKind;
use crate::state::AppState;
use crate::web::forms::SearchQuery;
use crate::web::page::{Flash, Layout, PageError, PageResultExt, render};
use crate::web::views::{PlayerRow, StatGroupView};

#[derive(Template, WebTemplate)]
#[template(path = "players/index.html")]
struct PlayersTemplate {
    layout: Layout,
    players: Vec<PlayerRow>,
    query: String,
}

/// A link to the team a player is rostered on.
struct TeamLink {
    id: i64,
    name: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "players/show.html")]
struct PlayerTemplate {
    layout: Layout,
    player: PlayerRow,
    team: Option<TeamLink>,
    season: i32,
    stat_groups: Vec<StatGroupView>,
}

/// `GET /players?q=`
pub async fn players_index(
    State(st): State<AppState>,
    current: CurrentUser,
    headers: HeaderMap,
    Query(search): Query<SearchQuery>,
) -> Result<Response, PageError> {
    let layout = Layout::new(&current, &headers);
    let players = st
        .catalog_service
        .list_players(search.q.as_deref())
        .await
        .or_page(&layout)?;
    let favorites = viewer_favorites(&st, &current, FavoriteKind::Player)
        .await
        .or_page(&layout)?;

    Ok(render(PlayersTemplate {
        layout,
        players: PlayerRow::list(&players, &favorites),
        query: search.q.unwrap_or_default(),
    }))
}

/// `GET /players/{id}`
///
/// A provider outage still renders the profile, without statistics.
pub async fn player_show(
    State(st): State<AppState>,
    current: CurrentUser,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Response, PageError> {
    let mut layout = Layout::new(&current, &headers);
    let (player, team) = st
        .catalog_service
        .player_with_team(id)
        .await
        .or_page(&layout)?;
    let favorites = viewer_favorites(&st, &current, FavoriteKind::Player)
        .await
        .or_page(&layout)?;

    let stat_groups = match st.stats_service.statistics(&player).await {
        Ok(groups) => groups.iter().map(StatGroupView::from).collect(),
        Err(e) => {
            tracing::warn!(player_id = player.id, "Statistics unavailable: {}", e);
            layout = layout.flash(Flash::danger("Statistics are unavailable right now."));
            Vec::new()
        }
    };

    Ok(render(PlayerTemplate {
        layout,
        player: PlayerRow::new(&player, &favorites),
        team: team.map(|t| TeamLink {
            id: t.id,
            name: t.name,
        }),
        season: st.stats_service.season(),
        stat_groups,
    }))
}
