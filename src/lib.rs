//! Cookie consent handling for axum applications.
//!
//! The add-on has three pieces: routes that render the consent form
//! ([`routes::router`]), a response layer that injects the consent banner
//! into outgoing HTML pages and captures form submissions into a cookie
//! ([`consent_middleware`]), and the cookie itself, a single versioned
//! value holding the visitor's per-category choices and a consent key.
//!
//! The banner disappears once a decision is saved; excluded routes and
//! path prefixes never receive it, and neither do requests marked as
//! [`SubRequest`]s.

pub mod category;
pub mod config;
pub mod cookie;
pub mod dom;
pub mod form;
pub mod html;
pub mod locale;
pub mod middleware;
pub mod pipeline;
pub mod routes;

pub use category::CookieCategory;
pub use config::ConsentConfig;
pub use cookie::codec::{CategoryChoices, ConsentDecision};
pub use cookie::log::{ConsentLogger, TracingConsentLogger};
pub use locale::Locale;
pub use middleware::{consent_middleware, SubRequest};
pub use routes::{router, ConsentState};
