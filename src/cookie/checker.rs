use axum::http::{header, HeaderMap};
use cookie::Cookie;

use crate::config::ConsentConfig;
use crate::cookie::codec::{self, ConsentDecision};

/// The decoded consent decision carried by the request, if any.
///
/// A missing cookie and a value that fails to decode both read as `None`;
/// neither is an error on this path.
pub fn saved_consent(headers: &HeaderMap, config: &ConsentConfig) -> Option<ConsentDecision> {
    let value = cookie_value(headers, &config.cookie_name())?;
    codec::decode(&value).ok()
}

/// Whether the visitor already saved a consent decision: the cookie is
/// present and decodes to a non-empty category map.
pub fn is_consent_saved(headers: &HeaderMap, config: &ConsentConfig) -> bool {
    saved_consent(headers, config).is_some_and(|decision| !decision.choices.is_empty())
}

/// Find a cookie by name across the request's `Cookie` headers.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    for header in headers.get_all(header::COOKIE) {
        let Ok(header) = header.to_str() else {
            continue;
        };
        for part in header.split(';') {
            if let Ok(cookie) = Cookie::parse_encoded(part.trim()) {
                if cookie.name() == name {
                    return Some(cookie.value().to_owned());
                }
            }
        }
    }
    None
}
