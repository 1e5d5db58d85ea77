use axum::http::{header, HeaderMap, HeaderValue};
use cookie::time::Duration;
use cookie::Cookie;

use crate::config::ConsentConfig;
use crate::cookie::codec::{self, ConsentDecision};

/// Append the `Set-Cookie` header persisting a decision to the outgoing
/// response headers, with the configured name, path and security flags.
pub fn write_consent_cookie(
    headers: &mut HeaderMap,
    config: &ConsentConfig,
    decision: &ConsentDecision,
) {
    let cookie = Cookie::build((config.cookie_name(), codec::encode(decision)))
        .path(config.cookie_path.clone())
        .max_age(Duration::days(config.cookie_ttl_days))
        .http_only(config.cookie_http_only)
        .secure(config.cookie_secure)
        .same_site(config.cookie_same_site)
        .build();

    match HeaderValue::from_str(&cookie.encoded().to_string()) {
        Ok(value) => {
            headers.append(header::SET_COOKIE, value);
        }
        Err(error) => {
            tracing::error!(%error, "consent cookie does not form a valid Set-Cookie header");
        }
    }
}
