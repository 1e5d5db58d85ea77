use cookie::SameSite;

use crate::locale::Locale;

/// Static configuration for the consent add-on.
///
/// Built once at startup and shared behind the state struct; nothing here
/// is mutated at runtime.
#[derive(Clone, Debug)]
pub struct ConsentConfig {
    /// Prefix for the consent cookie; the full name is `{prefix}_consent`.
    pub cookie_prefix: String,

    /// `Path` attribute of the consent cookie.
    pub cookie_path: String,

    /// `Max-Age` of the consent cookie, in days.
    pub cookie_ttl_days: i64,

    pub cookie_http_only: bool,
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,

    /// Theme name rendered as a CSS class on the consent markup.
    pub theme: String,

    /// Optional stylesheet linked by the standalone consent document.
    pub stylesheet: Option<String>,

    /// Locale used when a request does not select one.
    pub default_locale: Locale,

    /// Matched-route patterns the banner is never injected into.
    pub excluded_routes: Vec<String>,

    /// Request-path prefixes the banner is never injected into.
    pub excluded_paths: Vec<String>,

    /// Whether consent decisions are recorded through the logger.
    pub use_logger: bool,
}

impl Default for ConsentConfig {
    fn default() -> Self {
        ConsentConfig {
            cookie_prefix: "cookie".to_owned(),
            cookie_path: "/".to_owned(),
            cookie_ttl_days: 365,
            cookie_http_only: true,
            cookie_secure: false,
            cookie_same_site: SameSite::Lax,
            theme: "light".to_owned(),
            stylesheet: None,
            default_locale: Locale::En,
            excluded_routes: Vec::new(),
            excluded_paths: Vec::new(),
            use_logger: true,
        }
    }
}

impl ConsentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full name of the consent cookie.
    pub fn cookie_name(&self) -> String {
        format!("{}_consent", self.cookie_prefix)
    }

    /// Whether the banner must stay out of this request. Routes match the
    /// matched-route pattern exactly; paths match by prefix.
    pub fn is_excluded(&self, route: Option<&str>, path: &str) -> bool {
        if let Some(route) = route {
            if self.excluded_routes.iter().any(|r| r == route) {
                return true;
            }
        }
        self.excluded_paths.iter().any(|p| path.starts_with(p))
    }

    pub fn cookie_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.cookie_prefix = prefix.into();
        self
    }

    pub fn cookie_path(mut self, path: impl Into<String>) -> Self {
        self.cookie_path = path.into();
        self
    }

    pub fn cookie_ttl_days(mut self, days: i64) -> Self {
        self.cookie_ttl_days = days;
        self
    }

    pub fn cookie_http_only(mut self, http_only: bool) -> Self {
        self.cookie_http_only = http_only;
        self
    }

    pub fn cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    pub fn cookie_same_site(mut self, same_site: SameSite) -> Self {
        self.cookie_same_site = same_site;
        self
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn stylesheet(mut self, href: impl Into<String>) -> Self {
        self.stylesheet = Some(href.into());
        self
    }

    pub fn default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    pub fn exclude_route(mut self, route: impl Into<String>) -> Self {
        self.excluded_routes.push(route.into());
        self
    }

    pub fn exclude_path(mut self, prefix: impl Into<String>) -> Self {
        self.excluded_paths.push(prefix.into());
        self
    }

    pub fn use_logger(mut self, use_logger: bool) -> Self {
        self.use_logger = use_logger;
        self
    }
}
