//! Cookie header helpers for the session and flash cookies.

use axum::http::{HeaderMap, header};

/// Name of the cookie carrying the signed session.
pub const SESSION_COOKIE: &str = "session";

/// Name of the cookie carrying a one-shot page message.
pub const FLASH_COOKIE: &str = "flash";

/// Extracts a cookie value by name from the `Cookie` headers.
///
/// Handles multiple cookies per header (`a=1; b=2`) and multiple `Cookie`
/// headers. Returns the first match.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::COOKIE, "theme=dark; session=42.abcd".parse().unwrap());
///
/// assert_eq!(find_cookie(&headers, "session").as_deref(), Some("42.abcd"));
/// ```
pub fn find_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookie_str| cookie_str.split(';'))
        .find_map(|cookie| {
            let mut parts = cookie.trim().splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(key), Some(value)) if key == name => Some(value.to_string()),
                _ => None,
            }
        })
}

/// `Set-Cookie` value installing a session token.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value removing the session cookie.
pub fn expired_session_cookie() -> String {
    expired_cookie(SESSION_COOKIE)
}

/// `Set-Cookie` value removing the cookie `name`.
pub fn expired_cookie(name: &str) -> String {
    format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// `Set-Cookie` value for a flash message; `value` must be cookie-safe.
pub fn flash_cookie(value: &str) -> String {
    format!("{FLASH_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age=60")
}

/// Reads the session token from a `Set-Cookie` header value, if it sets one.
pub fn session_from_set_cookie(set_cookie: &str) -> Option<String> {
    let pair = set_cookie.split(';').next()?.trim();
    let (key, value) = pair.split_once('=')?;
    (key == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_find_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session=42.abcd; lang=en"),
        );

        assert_eq!(find_cookie(&headers, "session").as_deref(), Some("42.abcd"));
        assert_eq!(find_cookie(&headers, "lang").as_deref(), Some("en"));
        assert_eq!(find_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_find_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(header::COOKIE, HeaderValue::from_static("session=7.ff"));

        assert_eq!(find_cookie(&headers, "session").as_deref(), Some("7.ff"));
    }

    #[test]
    fn test_set_cookie_round_trip() {
        let header = session_cookie("42.abcd");
        assert_eq!(session_from_set_cookie(&header).as_deref(), Some("42.abcd"));
        assert_eq!(session_from_set_cookie(&expired_session_cookie()), None);
        assert_eq!(session_from_set_cookie("theme=dark; Path=/"), None);
    }
}
