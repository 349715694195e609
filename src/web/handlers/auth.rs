//! Sign-up, login and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use validator::Validate;

use crate::api::middleware::CurrentUser;
use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::cookies;
use crate::web::forms::{LoginForm, SignupForm, describe};
use crate::web::page::{Flash, Layout, PageError, render};

#[derive(Template, WebTemplate)]
#[template(path = "users/signup.html")]
struct SignupTemplate {
    layout: Layout,
    form: SignupForm,
}

#[derive(Template, WebTemplate)]
#[template(path = "users/login.html")]
struct LoginTemplate {
    layout: Layout,
    username: String,
}

/// Signs `user` in and sends them home with a greeting.
fn start_session(st: &AppState, user: &User, greeting: String) -> Response {
    let token = st.auth_service.issue_session(user);
    (
        AppendHeaders([
            (SET_COOKIE, cookies::session_cookie(&token)),
            (SET_COOKIE, cookies::flash_cookie(&Flash::success(greeting).encoded())),
        ]),
        Redirect::to("/"),
    )
        .into_response()
}

/// `GET /signup`
pub async fn signup_page(current: CurrentUser, headers: HeaderMap) -> Response {
    render(SignupTemplate {
        layout: Layout::new(&current, &headers),
        form: SignupForm::default(),
    })
}

/// `POST /signup`
///
/// Re-renders the form with a message when the data is invalid or the
/// username or email is taken.
pub async fn signup_submit(
    State(st): State<AppState>,
    current: CurrentUser,
    headers: HeaderMap,
    Form(form): Form<SignupForm>,
) -> Result<Response, PageError> {
    let layout = Layout::new(&current, &headers);

    match st.auth_service.register(form.clone().into()).await {
        Ok(user) => Ok(start_session(&st, &user, format!("Welcome {}!", user.username))),
        Err(AppError::Conflict { .. }) => Ok(render(SignupTemplate {
            layout: layout.flash(Flash::danger("Username/email already taken")),
            form: SignupForm {
                password: String::new(),
                ..form
            },
        })),
        Err(AppError::Validation { details, .. }) => {
            let mut fields: Vec<String> = details
                .as_object()
                .map(|m| m.keys().cloned().collect())
                .unwrap_or_default();
            fields.sort();
            Ok(render(SignupTemplate {
                layout: layout.flash(Flash::danger(format!(
                    "Please check: {}",
                    fields.join(", ")
                ))),
                form: SignupForm {
                    password: String::new(),
                    ..form
                },
            }))
        }
        Err(e) => Err(PageError::new(e, &layout)),
    }
}

/// `GET /login`
pub async fn login_page(current: CurrentUser, headers: HeaderMap) -> Response {
    render(LoginTemplate {
        layout: Layout::new(&current, &headers),
        username: String::new(),
    })
}

/// `POST /login`
pub async fn login_submit(
    State(st): State<AppState>,
    current: CurrentUser,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Result<Response, PageError> {
    let layout = Layout::new(&current, &headers);

    if let Err(errors) = form.validate() {
        return Ok(render(LoginTemplate {
            layout: layout.flash(Flash::danger(describe(&errors))),
            username: form.username,
        }));
    }

    match st
        .auth_service
        .authenticate(&form.username, &form.password)
        .await
    {
        Ok(Some(user)) => {
            tracing::info!(user_id = user.id, "User logged in");
            Ok(start_session(
                &st,
                &user,
                format!("Welcome back {}!", user.username),
            ))
        }
        Ok(None) => Ok(render(LoginTemplate {
            layout: layout.flash(Flash::danger("Invalid username/password!")),
            username: form.username,
        })),
        Err(e) => Err(PageError::new(e, &layout)),
    }
}

/// `GET /logout`
pub async fn logout_handler() -> Response {
    (
        AppendHeaders([
            (SET_COOKIE, cookies::expired_session_cookie()),
            (
                SET_COOKIE,
                cookies::flash_cookie(&Flash::success("Logout successful!").encoded()),
            ),
        ]),
        Redirect::to("/"),
    )
        .into_response()
}
