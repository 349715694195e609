//! HTTP side of the toggle client.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, COOKIE, SET_COOKIE};
use std::time::Duration;
use url::Url;

use super::error::ToggleError;
use crate::api::dto::favorite::ToggleStatus;
use crate::domain::entities::FavoriteKind;
use crate::utils::cookies::{SESSION_COOKIE, session_from_set_cookie};

/// Raw response to a toggle submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleResponse {
    pub status: u16,
    pub body: String,
}

impl ToggleResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// How a toggle response is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    /// The server refused: no session.
    Unauthorized,
    /// The server accepted. Carries its view of the favorite when the body
    /// was a JSON [`ToggleStatus`].
    Toggled(Option<ToggleStatus>),
}

/// Interprets a toggle response.
///
/// - `401`, or a `2xx` body of exactly `Unauthorized`, is [`Classified::Unauthorized`]
/// - any other `2xx` is [`Classified::Toggled`]
/// - everything else is [`ToggleError::Status`]
pub fn classify(response: &ToggleResponse) -> Result<Classified, ToggleError> {
    if response.status == 401 {
        return Ok(Classified::Unauthorized);
    }

    if !(200..300).contains(&response.status) {
        return Err(ToggleError::Status {
            status: response.status,
            body: response.body.clone(),
        });
    }

    if response.body == "Unauthorized" {
        return Ok(Classified::Unauthorized);
    }

    Ok(Classified::Toggled(
        serde_json::from_str::<ToggleStatus>(&response.body).ok(),
    ))
}

/// Sends toggle submissions to a server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToggleTransport: Send + Sync {
    /// POSTs the toggle form for `(kind, id)` and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`ToggleError::Transport`] if no response was received.
    async fn submit(&self, kind: FavoriteKind, id: i64) -> Result<ToggleResponse, ToggleError>;
}

/// [`ToggleTransport`] over HTTP with an optional session cookie.
#[derive(Debug, Clone)]
pub struct HttpToggleTransport {
    client: reqwest::Client,
    base_url: Url,
    session: Option<String>,
}

impl HttpToggleTransport {
    /// Creates a transport for the site at `base_url`.
    ///
    /// A path prefix is kept: with `http://host/app`, toggles go to
    /// `http://host/app/users/...`.
    ///
    /// # Errors
    ///
    /// Returns [`ToggleError::InvalidBaseUrl`] if `base_url` is not an absolute
    /// http(s) URL, or [`ToggleError::Transport`] if the client cannot be built.
    pub fn new(base_url: &str, session: Option<String>) -> Result<Self, ToggleError> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| ToggleError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ToggleError::InvalidBaseUrl(base_url.to_string()));
        }

        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        base_url.set_query(None);
        base_url.set_fragment(None);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    /// Returns a copy that sends `session` with every submission.
    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    /// Resolves a site path against the base URL, keeping its path prefix.
    fn url(&self, path: &str) -> Result<Url, ToggleError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ToggleError::InvalidBaseUrl(format!("{}: {e}", self.base_url)))
    }

    /// Signs in through the login form and returns the session token.
    ///
    /// Returns `Ok(None)` if the credentials were rejected.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<String>, ToggleError> {
        let response = self
            .client
            .post(self.url("/login")?)
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        let session = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(session_from_set_cookie);

        Ok(session)
    }

    /// Fetches a page as the signed-in user, for seeding a [`ButtonRegistry`].
    ///
    /// [`ButtonRegistry`]: super::ButtonRegistry
    pub async fn fetch_page(&self, path: &str) -> Result<String, ToggleError> {
        let mut request = self.client.get(self.url(path)?);
        if let Some(session) = &self.session {
            request = request.header(COOKIE, format!("{SESSION_COOKIE}={session}"));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ToggleError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl ToggleTransport for HttpToggleTransport {
    async fn submit(&self, kind: FavoriteKind, id: i64) -> Result<ToggleResponse, ToggleError> {
        let mut request = self
            .client
            .post(self.url(&kind.toggle_path(id))?)
            .header(ACCEPT, "application/json");

        if let Some(session) = &self.session {
            request = request.header(COOKIE, format!("{SESSION_COOKIE}={session}"));
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(%kind, id, status, "Toggle submitted");

        Ok(ToggleResponse { status, body })
    }
}
