//! The session cookie.

use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Utc};
use time::OffsetDateTime;

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Cookie delivering `token` until `expires_at`.
pub fn session_cookie(token: String, expires_at: DateTime<Utc>, secure: bool) -> Cookie<'static> {
    let expires = OffsetDateTime::from_unix_timestamp(expires_at.timestamp())
        .unwrap_or(OffsetDateTime::UNIX_EPOCH);

    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .expires(expires)
        .build()
}

/// Cookie that overwrites the session cookie with an empty, already expired one.
pub fn cleared_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
}
