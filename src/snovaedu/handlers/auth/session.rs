//! Session cookie contract: build, clear and extract.

use axum::http::{
    header::{InvalidHeaderValue, COOKIE},
    HeaderMap, HeaderValue,
};

use super::state::AuthConfig;

pub(crate) const SESSION_COOKIE_NAME: &str = "session";

/// Build the `Set-Cookie` value for a freshly issued session token.
pub(super) fn session_cookie(
    config: &AuthConfig,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let max_age = config.session_ttl_seconds();
    let domain = config.site_domain();
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}={token}; HttpOnly; Secure; SameSite=Lax; Path=/; Domain={domain}; Max-Age={max_age}"
    ))
}

/// Clear-cookie value issued on logout. Carries no Domain attribute so it
/// matches the cookie regardless of how the page was served.
pub(super) fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static(
        "session=; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=0",
    )
}

/// Session token from the request's `Cookie` header, if present.
pub(super) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        let Some(key) = parts.next() else { continue };
        // Flag-style pairs without '=' are skipped, not fatal
        let Some(val) = parts.next() else { continue };
        if key.trim() == SESSION_COOKIE_NAME {
            return Some(val.trim().to_string());
        }
    }
    None
}
