use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use maud::Markup;
use serde::Deserialize;

use crate::config::ConsentConfig;
use crate::cookie::checker;
use crate::cookie::log::{ConsentLogger, TracingConsentLogger};
use crate::html;
use crate::locale::Locale;
use crate::pipeline::ResponsePipeline;

/// Shared state behind the consent routes and the response layer.
#[derive(Clone)]
pub struct ConsentState {
    config: Arc<ConsentConfig>,
    pipeline: Arc<ResponsePipeline>,
}

impl ConsentState {
    pub fn new(config: ConsentConfig) -> Self {
        Self::with_logger(config, Arc::new(TracingConsentLogger))
    }

    /// Use a different decision logger, such as a database writer or a
    /// test recorder.
    pub fn with_logger(config: ConsentConfig, logger: Arc<dyn ConsentLogger>) -> Self {
        let config = Arc::new(config);
        let pipeline = Arc::new(ResponsePipeline::standard(config.clone(), logger));
        ConsentState { config, pipeline }
    }

    pub fn config(&self) -> &ConsentConfig {
        &self.config
    }

    pub(crate) fn pipeline(&self) -> &ResponsePipeline {
        &self.pipeline
    }
}

/// The add-on's routes, ready to merge into the host application.
pub fn router(state: ConsentState) -> Router {
    Router::new()
        .route("/cookie_consent", get(show))
        .route("/cookie_consent_alt", get(show_if_cookie_consent_not_set))
        .with_state(state)
}

#[derive(Deserialize)]
pub struct ShowQuery {
    locale: Option<String>,
}

/// Render the standalone consent form, for iframe or AJAX embedding.
///
/// A `locale` query parameter switches the labels for this request only.
pub async fn show(State(state): State<ConsentState>, Query(query): Query<ShowQuery>) -> Markup {
    html::consent_document(state.config(), request_locale(&state, &query))
}

/// Render the consent form only when the visitor has not saved a decision
/// yet; an empty response otherwise.
pub async fn show_if_cookie_consent_not_set(
    State(state): State<ConsentState>,
    Query(query): Query<ShowQuery>,
    headers: HeaderMap,
) -> Response {
    if checker::is_consent_saved(&headers, state.config()) {
        return ().into_response();
    }
    html::consent_document(state.config(), request_locale(&state, &query)).into_response()
}

fn request_locale(state: &ConsentState, query: &ShowQuery) -> Locale {
    query
        .locale
        .as_deref()
        .and_then(Locale::from_tag)
        .unwrap_or(state.config().default_locale)
}
