//! Session cookie middleware resolving the signed-in user.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;

use crate::domain::entities::User;
use crate::state::AppState;
use crate::utils::cookies::{SESSION_COOKIE, find_cookie};

/// The user a request was made by, if any.
///
/// Inserted by [`layer`]. Extracting it never fails: routes mounted without the
/// middleware see an anonymous visitor.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }

    pub fn id(&self) -> Option<i64> {
        self.0.as_ref().map(|u| u.id)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Resolves the `session` cookie for every request.
///
/// # Cookie Format
///
/// ```text
/// Cookie: session=<user_id>.<issued_at>.<hex signature>
/// ```
///
/// A missing, tampered, expired or stale cookie yields an anonymous request rather than
/// an error; handlers decide whether a user is required. Lookup failures are
/// logged and treated the same way.
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let user = match find_cookie(req.headers(), SESSION_COOKIE) {
        Some(token) => match st.auth_service.resolve_session(&token).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Session lookup failed: {}", e);
                None
            }
        },
        None => None,
    };

    req.extensions_mut().insert(CurrentUser(user));
    next.run(req).await
}
