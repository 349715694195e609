//! Home page: every team.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::HeaderMap,
    response::Response,
};

use super::viewer_favorites;
use crate::api::middleware::CurrentUser;
use crate::domain::entities::FavoriteKind;
use crate::state::AppState;
use crate::web::page::{Layout, PageError, PageResultExt, render};
use crate::web::views::TeamCard;

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
struct HomeTemplate {
    layout: Layout,
    teams: Vec<TeamCard>,
}

/// `GET /`
pub async fn home_handler(
    State(st): State<AppState>,
    current: CurrentUser,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    let layout = Layout::new(&current, &headers);

    let teams = st.catalog_service.list_teams().await.or_page(&layout)?;
    let favorites = viewer_favorites(&st, &current, FavoriteKind::Team)
        .await
        .or_page(&layout)?;

    Ok(render(HomeTemplate {
        teams: TeamCard::list(&teams, &favorites),
        layout,
    }))
}
