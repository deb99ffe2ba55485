//! `auth_token` session cookie

use chrono::{DateTime, Utc};
use http::HeaderMap;
use http::header::COOKIE;

use super::token::IssuedToken;

pub const AUTH_COOKIE: &str = "auth_token";

const ATTRIBUTES: &str = "Path=/; HttpOnly; Secure; SameSite=Strict";

fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// `Set-Cookie` value delivering a freshly issued token
pub fn session_cookie(issued: &IssuedToken) -> String {
    let max_age = (issued.expires_at - Utc::now()).num_seconds().max(0);
    format!(
        "{AUTH_COOKIE}={}; {ATTRIBUTES}; Expires={}; Max-Age={max_age}",
        issued.token,
        http_date(issued.expires_at)
    )
}

/// `Set-Cookie` value that makes the client drop the session
pub fn revoked_cookie() -> String {
    format!(
        "{AUTH_COOKIE}=; {ATTRIBUTES}; Expires={}; Max-Age=0",
        http_date(DateTime::<Utc>::UNIX_EPOCH)
    )
}

/// Read the session token from the request's `Cookie` headers
///
/// An empty value counts as absent.
pub fn read_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == AUTH_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}
