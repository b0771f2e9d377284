//! Cookie construction and parsing helpers.
//!
//! Both cookies are HttpOnly and SameSite=Lax. The session cookie has no
//! Max-Age so the browser drops it when the window closes; the remember
//! cookie outlives the browser session.

use axum::http::{header::COOKIE, HeaderMap, HeaderValue};

use crate::config::{REMEMBER_COOKIE, SESSION_COOKIE};
use crate::errors::{AppError, AppResult};

/// Build the session cookie carrying the opaque session id.
pub fn session_cookie(session_id: &str, secure: bool) -> AppResult<HeaderValue> {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, session_id
    );
    if secure {
        cookie.push_str("; Secure");
    }
    header_value(cookie)
}

/// Build an expired session cookie to clear it client-side.
pub fn clear_session_cookie(secure: bool) -> AppResult<HeaderValue> {
    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    );
    if secure {
        cookie.push_str("; Secure");
    }
    header_value(cookie)
}

/// Build the long-lived remember-me cookie carrying the signed token.
pub fn remember_cookie(token: &str, max_age_seconds: i64, secure: bool) -> AppResult<HeaderValue> {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        REMEMBER_COOKIE, token, max_age_seconds
    );
    if secure {
        cookie.push_str("; Secure");
    }
    header_value(cookie)
}

/// Build an expired remember-me cookie to clear it client-side.
pub fn clear_remember_cookie(secure: bool) -> AppResult<HeaderValue> {
    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        REMEMBER_COOKIE
    );
    if secure {
        cookie.push_str("; Secure");
    }
    header_value(cookie)
}

/// Extract a named cookie's value from the Cookie request header.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;

    for pair in value.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        let (Some(key), Some(val)) = (parts.next(), parts.next()) else {
            continue;
        };
        if key.trim() == name && !val.trim().is_empty() {
            return Some(val.trim().to_string());
        }
    }

    None
}

fn header_value(cookie: String) -> AppResult<HeaderValue> {
    HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::internal(format!("Invalid cookie value: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc123", false).unwrap();
        let value = cookie.to_str().unwrap();

        assert!(value.starts_with("wicket_session=abc123"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
        // Session-scoped: expires with the browser, not on a clock
        assert!(!value.contains("Max-Age"));
        assert!(!value.contains("Secure"));
    }

    #[test]
    fn test_secure_flag_appended() {
        let cookie = session_cookie("abc123", true).unwrap();
        assert!(cookie.to_str().unwrap().ends_with("; Secure"));
    }

    #[test]
    fn test_remember_cookie_max_age() {
        let cookie = remember_cookie("tok", 604800, false).unwrap();
        let value = cookie.to_str().unwrap();

        assert!(value.starts_with("wicket_remember=tok"));
        assert!(value.contains("Max-Age=604800"));
    }

    #[test]
    fn test_clear_cookies_expire_immediately() {
        let session = clear_session_cookie(false).unwrap();
        let remember = clear_remember_cookie(false).unwrap();

        assert!(session.to_str().unwrap().contains("Max-Age=0"));
        assert!(remember.to_str().unwrap().contains("Max-Age=0"));
    }

    #[test]
    fn test_cookie_value_found() {
        let headers = headers_with_cookie("other=1; wicket_session=abc123; more=2");
        assert_eq!(
            cookie_value(&headers, "wicket_session"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_cookie_value_missing() {
        let headers = headers_with_cookie("other=1");
        assert_eq!(cookie_value(&headers, "wicket_session"), None);
    }

    #[test]
    fn test_cookie_value_empty_is_none() {
        let headers = headers_with_cookie("wicket_session=");
        assert_eq!(cookie_value(&headers, "wicket_session"), None);
    }

    #[test]
    fn test_cookie_value_no_header() {
        let headers = HeaderMap::new();
        assert_eq!(cookie_value(&headers, "wicket_session"), None);
    }

    #[test]
    fn test_cookie_value_skips_malformed_pairs() {
        let headers = headers_with_cookie("flagonly; wicket_session=abc123");
        assert_eq!(
            cookie_value(&headers, "wicket_session"),
            Some("abc123".to_string())
        );
    }
}
