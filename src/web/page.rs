//! Page chrome shared by every template: navigation, flash messages and
//! error pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};

use crate::api::middleware::CurrentUser;
use crate::error::AppError;
use crate::utils::cookies::{self, FLASH_COOKIE};

/// One-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    /// Bootstrap alert flavor: `success`, `danger` or `info`.
    pub category: String,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: "success".to_string(),
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            category: "danger".to_string(),
            message: message.into(),
        }
    }

    /// Cookie-safe form of the message.
    pub fn encoded(&self) -> String {
        hex::encode(format!("{}\n{}", self.category, self.message))
    }

    fn decode(value: &str) -> Option<Self> {
        let bytes = hex::decode(value).ok()?;
        let text = String::from_utf8(bytes).ok()?;
        let (category, message) = text.split_once('\n')?;
        Some(Self {
            category: category.to_string(),
            message: message.to_string(),
        })
    }
}

/// The signed-in user as shown in the navigation bar.
#[derive(Debug, Clone)]
pub struct NavUser {
    pub id: i64,
    pub username: String,
    pub image_url: String,
}

/// Data the base template needs on every page.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub user: Option<NavUser>,
    pub flashes: Vec<Flash>,
}

impl Layout {
    /// Builds the layout for a request, consuming any pending flash cookie.
    pub fn new(current: &CurrentUser, headers: &HeaderMap) -> Self {
        let user = current.user().map(|u| NavUser {
            id: u.id,
            username: u.username.clone(),
            image_url: u.image_url.clone(),
        });

        let flashes = cookies::find_cookie(headers, FLASH_COOKIE)
            .and_then(|value| Flash::decode(&value))
            .into_iter()
            .collect();

        Self { user, flashes }
    }

    /// Adds a message rendered on the current page.
    pub fn flash(mut self, flash: Flash) -> Self {
        self.flashes.push(flash);
        self
    }

    pub fn logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user_id(&self) -> i64 {
        self.user.as_ref().map(|u| u.id).unwrap_or_default()
    }

    pub fn username(&self) -> &str {
        self.user.as_ref().map(|u| u.username.as_str()).unwrap_or("")
    }
}

/// Renders `body`, clearing the flash cookie it was built from.
pub fn render(body: impl IntoResponse) -> Response {
    (
        AppendHeaders([(SET_COOKIE, cookies::expired_cookie(FLASH_COOKIE))]),
        body,
    )
        .into_response()
}

/// Redirects with `303 See Other`, showing `flash` on the next page.
pub fn redirect_with_flash(to: &str, flash: Flash) -> Response {
    (
        AppendHeaders([(SET_COOKIE, cookies::flash_cookie(&flash.encoded()))]),
        Redirect::to(to),
    )
        .into_response()
}

#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
struct ErrorTemplate {
    layout: Layout,
    status: u16,
    message: String,
}

/// An [`AppError`] rendered as an HTML page instead of JSON.
pub struct PageError {
    error: AppError,
    layout: Layout,
}

impl PageError {
    pub fn new(error: AppError, layout: &Layout) -> Self {
        Self {
            error,
            layout: layout.clone(),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.error.status();
        if status.is_server_error() {
            tracing::error!(error = %self.error, "Page failed");
        }

        let message = match status {
            StatusCode::NOT_FOUND => "Page not found".to_string(),
            s if s.is_server_error() => "Something went wrong".to_string(),
            _ => self.error.to_string(),
        };

        let page = ErrorTemplate {
            layout: self.layout,
            status: status.as_u16(),
            message,
        };

        (status, page).into_response()
    }
}

/// Attaches the page layout to service errors.
pub trait PageResultExt<T> {
    fn or_page(self, layout: &Layout) -> Result<T, PageError>;
}

impl<T> PageResultExt<T> for Result<T, AppError> {
    fn or_page(self, layout: &Layout) -> Result<T, PageError> {
        self.map_err(|e| PageError::new(e, layout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header::COOKIE};

    #[test]
    fn test_flash_cookie_round_trip() {
        let flash = Flash::success("Welcome back alice!");
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("{FLASH_COOKIE}={}", flash.encoded())).unwrap(),
        );

        let layout = Layout::new(&CurrentUser::default(), &headers);
        assert_eq!(layout.flashes, vec![flash]);
        assert!(!layout.logged_in());
    }

    #[test]
    fn test_garbage_flash_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("flash=zz-not-hex"));

        let layout = Layout::new(&CurrentUser::default(), &headers);
        assert!(layout.flashes.is_empty());
    }
}
