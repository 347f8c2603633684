//! Session token plumbing.
//!
//! Tokens reach the API either as a bearer `Authorization` header (the
//! player client) or as the session cookies set by the OAuth callback
//! (browsers). One cookie name pair, parsed and minted here.

use axum::http::{header, HeaderMap, HeaderValue};

pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";
pub const REFRESH_TOKEN_COOKIE: &str = "sb-refresh-token";

/// The caller's access token, bearer header first, cookie second.
pub fn access_token(headers: &HeaderMap) -> Option<String> {
    bearer_token(headers).or_else(|| cookie_value(headers, ACCESS_TOKEN_COOKIE))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Value of a named cookie, if present on the request.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    for header_value in headers.get_all(header::COOKIE) {
        let Ok(raw) = header_value.to_str() else {
            continue;
        };
        for pair in raw.split(';') {
            if let Some((key, value)) = pair.trim().split_once('=') {
                if key == name {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// A `Set-Cookie` value for a session token.
pub fn session_cookie(name: &str, value: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax")).ok()
}

/// A `Set-Cookie` value that expires a session token.
pub fn clear_cookie(name: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok-a"));
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("sb-access-token=tok-b"),
        );
        assert_eq!(access_token(&headers).as_deref(), Some("tok-a"));
    }

    #[test]
    fn cookie_is_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; sb-access-token=tok-c; lang=en"),
        );
        assert_eq!(access_token(&headers).as_deref(), Some("tok-c"));
    }

    #[test]
    fn missing_token_is_none() {
        let headers = HeaderMap::new();
        assert!(access_token(&headers).is_none());
    }

    #[test]
    fn clear_cookie_sets_zero_max_age() {
        let value = clear_cookie(ACCESS_TOKEN_COOKIE).expect("valid header value");
        let text = value.to_str().expect("ascii");
        assert!(text.starts_with("sb-access-token=;"));
        assert!(text.contains("Max-Age=0"));
    }
}
