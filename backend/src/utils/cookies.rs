//! Helpers for the two auth cookies.
//!
//! Both tokens travel as `HttpOnly; Secure` cookies in addition to the JSON
//! body, so browsers keep them out of script reach. Building the header
//! values by hand keeps the attribute set explicit.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Build a `Set-Cookie` header value for an auth cookie.
pub fn build_set_cookie(name: &str, value: &str, max_age_seconds: i64) -> String {
    format!(
        "{}={}; Max-Age={}; Path=/; HttpOnly; Secure; SameSite=Strict",
        name, value, max_age_seconds
    )
}

/// Build a `Set-Cookie` header value that clears an auth cookie.
pub fn build_clear_cookie(name: &str) -> String {
    format!(
        "{}=; Max-Age=0; Path=/; HttpOnly; Secure; SameSite=Strict",
        name
    )
}

/// Extract a cookie value from the request `Cookie` header, if present.
pub fn get_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(COOKIE)?.to_str().ok()?;

    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key == name {
            Some(value.to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn set_cookie_carries_security_attributes() {
        let cookie = build_set_cookie(ACCESS_TOKEN_COOKIE, "abc123", 900);

        assert!(cookie.starts_with("accessToken=abc123;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("Max-Age=900"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = build_clear_cookie(REFRESH_TOKEN_COOKIE);

        assert!(cookie.starts_with("refreshToken=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn get_cookie_finds_value_among_pairs() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; accessToken=tok-a; refreshToken=tok-r"),
        );

        assert_eq!(
            get_cookie(&headers, ACCESS_TOKEN_COOKIE),
            Some("tok-a".to_string())
        );
        assert_eq!(
            get_cookie(&headers, REFRESH_TOKEN_COOKIE),
            Some("tok-r".to_string())
        );
        assert_eq!(get_cookie(&headers, "missing"), None);
    }
}
