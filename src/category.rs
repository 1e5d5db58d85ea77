use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A consent category the visitor can accept or decline independently.
///
/// The set is closed: cookie values and form fields naming anything else
/// are rejected (or ignored, depending on the caller's policy).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum CookieCategory {
    /// Usage measurement and statistics.
    Analytics,

    /// Cross-page and cross-site visitor tracking.
    Tracking,

    /// Advertising and remarketing.
    Marketing,

    /// Social media embeds and share widgets.
    Social,
}

impl CookieCategory {
    /// Every category, in the order forms and cookie values present them.
    pub const ALL: [CookieCategory; 4] = [
        CookieCategory::Analytics,
        CookieCategory::Tracking,
        CookieCategory::Marketing,
        CookieCategory::Social,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CookieCategory::Analytics => "analytics",
            CookieCategory::Tracking => "tracking",
            CookieCategory::Marketing => "marketing",
            CookieCategory::Social => "social",
        }
    }
}

impl FromStr for CookieCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CookieCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or(())
    }
}

impl Display for CookieCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_name() {
        for category in CookieCategory::ALL {
            assert_eq!(category.as_str().parse(), Ok(category));
        }
    }

    #[test]
    fn rejects_unknown_names() {
        assert!("preferences".parse::<CookieCategory>().is_err());
        assert!("Analytics".parse::<CookieCategory>().is_err());
        assert!("".parse::<CookieCategory>().is_err());
    }
}
