//! User directory, profiles and account management.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::{HeaderMap, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use validator::Validate;

use super::viewer_favorites;
use crate::api::middleware::CurrentUser;
use crate::domain::entities::{DEFAULT_IMAGE_URL, FavoriteKind, UpdateUser, User};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::cookies;
use crate::web::forms::{ProfileForm, SearchQuery, describe};
use crate::web::page::{Flash, Layout, PageError, PageResultExt, redirect_with_flash, render};
use crate::web::views::{RosterSection, TeamCard, UserCard};

#[derive(Template, WebTemplate)]
#[template(path = "users/index.html")]
struct UsersTemplate {
    layout: Layout,
    users: Vec<UserCard>,
    query: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "users/show.html")]
struct UserShowTemplate {
    layout: Layout,
    user: UserCard,
    teams: Vec<TeamCard>,
}

#[derive(Template, WebTemplate)]
#[template(path = "users/players.html")]
struct UserPlayersTemplate {
    layout: Layout,
    user: UserCard,
    sections: Vec<RosterSection>,
}

#[derive(Template, WebTemplate)]
#[template(path = "users/edit.html")]
struct EditTemplate {
    layout: Layout,
    user: UserCard,
    username: String,
    email: String,
    image_url: String,
}

impl EditTemplate {
    fn new(layout: Layout, user: &User, form: Option<&ProfileForm>) -> Self {
        let (username, email, image_url) = match form {
            Some(f) => (
                f.username.clone(),
                f.email.clone(),
                f.image_url.clone().unwrap_or_default(),
            ),
            None => (user.username.clone(), user.email.clone(), user.image_url.clone()),
        };

        Self {
            layout,
            user: UserCard::from(user),
            username,
            email,
            image_url,
        }
    }
}

/// `GET /users?q=`
pub async fn users_index(
    State(st): State<AppState>,
    current: CurrentUser,
    headers: HeaderMap,
    Query(search): Query<SearchQuery>,
) -> Result<Response, PageError> {
    let layout = Layout::new(&current, &headers);
    let users = st
        .user_service
        .list_users(search.q.as_deref())
        .await
        .or_page(&layout)?;

    Ok(render(UsersTemplate {
        layout,
        users: users.iter().map(UserCard::from).collect(),
        query: search.q.unwrap_or_default(),
    }))
}

/// `GET /users/{id}`: profile with favorite teams.
pub async fn user_show(
    State(st): State<AppState>,
    current: CurrentUser,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Response, PageError> {
    let layout = Layout::new(&current, &headers);
    let profile = st.user_service.profile(id).await.or_page(&layout)?;
    let favorites = viewer_favorites(&st, &current, FavoriteKind::Team)
        .await
        .or_page(&layout)?;

    Ok(render(UserShowTemplate {
        layout,
        user: UserCard::from(&profile.user),
        teams: TeamCard::list(&profile.favorite_teams, &favorites),
    }))
}

/// `GET /users/{id}/players`: favorite players by roster group.
pub async fn user_players(
    State(st): State<AppState>,
    current: CurrentUser,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Response, PageError> {
    let layout = Layout::new(&current, &headers);
    let (user, grouped) = st.user_service.favorite_players(id).await.or_page(&layout)?;
    let favorites = viewer_favorites(&st, &current, FavoriteKind::Player)
        .await
        .or_page(&layout)?;

    Ok(render(UserPlayersTemplate {
        layout,
        user: UserCard::from(&user),
        sections: RosterSection::grouped(&grouped, &favorites),
    }))
}

fn access_unauthorized() -> Response {
    redirect_with_flash("/", Flash::danger("Access unauthorized"))
}

/// `GET /users/profile`
pub async fn profile_page(current: CurrentUser, headers: HeaderMap) -> Response {
    let Some(user) = current.user() else {
        return access_unauthorized();
    };

    render(EditTemplate::new(Layout::new(&current, &headers), user, None))
}

/// `POST /users/profile`
///
/// Applies the edit only when the current password matches.
pub async fn profile_submit(
    State(st): State<AppState>,
    current: CurrentUser,
    headers: HeaderMap,
    Form(form): Form<ProfileForm>,
) -> Result<Response, PageError> {
    let Some(user) = current.user() else {
        return Ok(access_unauthorized());
    };
    let layout = Layout::new(&current, &headers);

    if let Err(errors) = form.validate() {
        return Ok(render(EditTemplate::new(
            layout.flash(Flash::danger(describe(&errors))),
            user,
            Some(&form),
        )));
    }

    let update = UpdateUser {
        username: form.username.trim().to_string(),
        email: form.email.trim().to_string(),
        image_url: form
            .image_url
            .clone()
            .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
    };

    match st
        .user_service
        .update_profile(user, &form.password, update)
        .await
    {
        Ok(updated) => Ok(Redirect::to(&format!("/users/{}", updated.id)).into_response()),
        Err(AppError::Unauthorized { .. }) => Ok(render(EditTemplate::new(
            layout.flash(Flash::danger("Invalid credentials.")),
            user,
            Some(&form),
        ))),
        Err(AppError::Conflict { .. }) => Ok(render(EditTemplate::new(
            layout.flash(Flash::danger("Username or email already taken!")),
            user,
            Some(&form),
        ))),
        Err(e) => Err(PageError::new(e, &layout)),
    }
}

/// `POST /users/delete`: deletes the signed-in account and ends the session.
pub async fn delete_account(
    State(st): State<AppState>,
    current: CurrentUser,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    let Some(user) = current.user() else {
        return Ok(access_unauthorized());
    };

    st.user_service
        .delete_user(user.id)
        .await
        .or_page(&Layout::new(&current, &headers))?;

    Ok((
        AppendHeaders([
            (SET_COOKIE, cookies::expired_session_cookie()),
            (
                SET_COOKIE,
                cookies::flash_cookie(&Flash::success("Account deleted successfully").encoded()),
            ),
        ]),
        Redirect::to("/"),
    )
        .into_response())
}
