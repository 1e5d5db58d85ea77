use std::sync::Arc;

use crate::config::ConsentConfig;
use crate::cookie::checker;
use crate::dom;
use crate::html;
use crate::pipeline::{InterceptedResponse, RequestContext, ResponseInterceptor};

/// Injects the consent banner into outgoing pages until the visitor saves
/// a decision.
pub struct BannerInjector {
    config: Arc<ConsentConfig>,
}

impl BannerInjector {
    pub fn new(config: Arc<ConsentConfig>) -> Self {
        BannerInjector { config }
    }
}

impl ResponseInterceptor for BannerInjector {
    fn on_response(&self, ctx: &RequestContext, response: &mut InterceptedResponse) {
        if ctx.sub_request {
            return;
        }
        if self.config.is_excluded(ctx.route.as_deref(), &ctx.path) {
            return;
        }
        if checker::is_consent_saved(&ctx.headers, &self.config) {
            return;
        }
        let Some(body) = response.body.as_mut() else {
            return;
        };

        let fragment = html::banner(&self.config, self.config.default_locale).into_string();
        *body = dom::append_to_body(body, &fragment);
        tracing::debug!(path = %ctx.path, "cookie consent banner injected");
    }
}
