use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::CookieCategory;

/// Version written into every encoded cookie value. Bump when the wire
/// shape changes incompatibly; older readers refuse newer versions.
pub const FORMAT_VERSION: u8 = 1;

/// Per-category acceptance, ordered the way the form presents categories.
pub type CategoryChoices = IndexMap<CookieCategory, bool>;

/// A saved consent decision: the visitor's choices plus the key that ties
/// them to the audit log.
#[derive(Clone, PartialEq, Debug)]
pub struct ConsentDecision {
    pub key: String,
    pub choices: CategoryChoices,
}

#[derive(Serialize)]
struct WireValue<'a> {
    v: u8,
    key: &'a str,
    categories: &'a CategoryChoices,
}

// Categories decode as plain strings so values written by a newer build
// with extra categories still read here.
#[derive(Deserialize)]
struct RawWireValue {
    v: u8,
    key: String,
    categories: IndexMap<String, bool>,
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("consent cookie value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported consent cookie format version {0}")]
    UnsupportedVersion(u8),
}

/// Encode a decision into the cookie value.
pub fn encode(decision: &ConsentDecision) -> String {
    let wire = WireValue {
        v: FORMAT_VERSION,
        key: &decision.key,
        categories: &decision.choices,
    };
    serde_json::to_string(&wire).expect("consent wire value serializes to JSON")
}

/// Decode a cookie value. Unknown category names are dropped; an unknown
/// format version is an error.
pub fn decode(value: &str) -> Result<ConsentDecision, DecodeError> {
    let wire: RawWireValue = serde_json::from_str(value)?;
    if wire.v != FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion(wire.v));
    }

    let mut choices = CategoryChoices::new();
    for (name, accepted) in wire.categories {
        if let Ok(category) = name.parse::<CookieCategory>() {
            choices.insert(category, accepted);
        }
    }

    Ok(ConsentDecision {
        key: wire.key,
        choices,
    })
}
