use std::sync::Arc;

use rand::Rng;

use crate::config::ConsentConfig;
use crate::cookie::checker;
use crate::cookie::codec::ConsentDecision;
use crate::cookie::log::ConsentLogger;
use crate::cookie::writer;
use crate::form::{self, Submission};
use crate::pipeline::{InterceptedResponse, RequestContext, ResponseInterceptor};

/// Persists a submitted consent form into the outgoing response's cookie
/// and, when enabled, the decision log.
pub struct FormCapture {
    config: Arc<ConsentConfig>,
    logger: Arc<dyn ConsentLogger>,
}

impl FormCapture {
    pub fn new(config: Arc<ConsentConfig>, logger: Arc<dyn ConsentLogger>) -> Self {
        FormCapture { config, logger }
    }
}

impl ResponseInterceptor for FormCapture {
    fn on_response(&self, ctx: &RequestContext, response: &mut InterceptedResponse) {
        let choices = match form::parse_submission(&ctx.form) {
            Submission::Valid(choices) => choices,
            Submission::NotSubmitted => return,
            // An invalid submission writes nothing; the banner simply
            // stays visible on the next response.
            Submission::Invalid(errors) => {
                tracing::debug!(?errors, "ignoring invalid cookie consent submission");
                return;
            }
        };

        // Keep the key the visitor already has so the audit trail stays
        // continuous across resubmissions.
        let key = checker::saved_consent(&ctx.headers, &self.config)
            .map(|decision| decision.key)
            .unwrap_or_else(generate_key);

        let decision = ConsentDecision { key, choices };
        writer::write_consent_cookie(&mut response.headers, &self.config, &decision);

        if self.config.use_logger {
            self.logger.log(&decision);
        }
    }
}

/// Consent keys are 128-bit random tokens, hex encoded.
fn generate_key() -> String {
    format!("{:032x}", rand::thread_rng().gen::<u128>())
}

#[cfg(test)]
mod tests {
    use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
    use cookie::Cookie;

    use super::*;
    use crate::category::CookieCategory;
    use crate::cookie::codec;
    use crate::pipeline::testing::{context, html_response, RecordingLogger};

    fn capture(config: ConsentConfig) -> (FormCapture, Arc<RecordingLogger>) {
        let logger = Arc::new(RecordingLogger::default());
        (
            FormCapture::new(Arc::new(config), logger.clone()),
            logger,
        )
    }

    fn submitted(fields: &[(&str, &str)]) -> Vec<(String, String)> {
        let mut pairs = vec![("cookie_consent".to_owned(), "1".to_owned())];
        pairs.extend(
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        pairs
    }

    fn written_decision(headers: &HeaderMap) -> ConsentDecision {
        let raw = headers
            .get(header::SET_COOKIE)
            .expect("a consent cookie was written")
            .to_str()
            .unwrap();
        let cookie = Cookie::parse_encoded(raw).unwrap();
        codec::decode(cookie.value()).unwrap()
    }

    #[test]
    fn writes_the_submitted_choices() {
        let (capture, logger) = capture(ConsentConfig::new());
        let mut ctx = context();
        ctx.form = submitted(&[("analytics", "true"), ("marketing", "false")]);
        let mut response = html_response("");

        capture.on_response(&ctx, &mut response);

        let decision = written_decision(&response.headers);
        assert!(decision.choices[&CookieCategory::Analytics]);
        assert!(!decision.choices[&CookieCategory::Marketing]);
        assert_eq!(decision.key.len(), 32);
        assert_eq!(*logger.decisions.lock().unwrap(), vec![decision]);
    }

    #[test]
    fn reuses_the_existing_consent_key() {
        let (capture, _) = capture(ConsentConfig::new());
        let mut ctx = context();
        ctx.headers.insert(
            header::COOKIE,
            HeaderValue::from_static(
                r#"cookie_consent={"v":1,"key":"stable","categories":{"analytics":true}}"#,
            ),
        );
        ctx.form = submitted(&[("social", "true")]);
        let mut response = html_response("");

        capture.on_response(&ctx, &mut response);

        let decision = written_decision(&response.headers);
        assert_eq!(decision.key, "stable");
        assert!(decision.choices[&CookieCategory::Social]);
        assert!(!decision.choices[&CookieCategory::Analytics]);
    }

    #[test]
    fn ignores_requests_without_the_form() {
        let (capture, logger) = capture(ConsentConfig::new());
        let mut response = html_response("");

        capture.on_response(&context(), &mut response);

        assert!(response.headers.get(header::SET_COOKIE).is_none());
        assert!(logger.decisions.lock().unwrap().is_empty());
    }

    #[test]
    fn ignores_invalid_submissions() {
        let (capture, logger) = capture(ConsentConfig::new());
        let mut ctx = context();
        ctx.form = submitted(&[("candy", "true")]);
        let mut response = html_response("");

        capture.on_response(&ctx, &mut response);

        assert!(response.headers.get(header::SET_COOKIE).is_none());
        assert!(logger.decisions.lock().unwrap().is_empty());
    }

    #[test]
    fn skips_the_logger_when_disabled() {
        let (capture, logger) = capture(ConsentConfig::new().use_logger(false));
        let mut ctx = context();
        ctx.form = submitted(&[("analytics", "true")]);
        let mut response = html_response("");

        capture.on_response(&ctx, &mut response);

        assert!(response.headers.get(header::SET_COOKIE).is_some());
        assert!(logger.decisions.lock().unwrap().is_empty());
    }

    #[test]
    fn writes_cookies_on_bodiless_responses() {
        let (capture, _) = capture(ConsentConfig::new());
        let mut ctx = context();
        ctx.form = submitted(&[("tracking", "true")]);
        let mut response = InterceptedResponse {
            status: StatusCode::SEE_OTHER,
            headers: HeaderMap::new(),
            body: None,
        };

        capture.on_response(&ctx, &mut response);

        assert!(response.headers.get(header::SET_COOKIE).is_some());
    }
}
