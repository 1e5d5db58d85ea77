//! The response pipeline: a fixed list of interceptors given read/write
//! access to each outgoing response, the add-on's stand-in for a framework
//! event dispatcher.

use std::sync::Arc;

use axum::http::{HeaderMap, Method, StatusCode};

use crate::config::ConsentConfig;
use crate::cookie::log::ConsentLogger;

pub mod banner;
pub mod capture;

/// What interceptors may learn about the request that produced the
/// response they are inspecting.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub method: Method,

    /// The request URI path.
    pub path: String,

    /// The matched route pattern, when the router knows it.
    pub route: Option<String>,

    /// Whether this response belongs to an internally dispatched request
    /// rather than the top-level one.
    pub sub_request: bool,

    /// The request headers, as received.
    pub headers: HeaderMap,

    /// Decoded urlencoded body pairs; empty when the request carried none.
    pub form: Vec<(String, String)>,
}

/// A response mid-pipeline.
#[derive(Debug)]
pub struct InterceptedResponse {
    pub status: StatusCode,

    /// Response headers; cookie writes land here.
    pub headers: HeaderMap,

    /// The response body, present only for HTML responses. A `None` body
    /// is never rewritten.
    pub body: Option<String>,
}

/// A hook run once per outgoing response.
pub trait ResponseInterceptor: Send + Sync {
    fn on_response(&self, ctx: &RequestContext, response: &mut InterceptedResponse);
}

/// The interceptor list, run in a fixed order.
pub struct ResponsePipeline {
    interceptors: Vec<Box<dyn ResponseInterceptor>>,
}

impl ResponsePipeline {
    /// The standard pipeline: form capture, then banner injection. The two
    /// touch disjoint parts of the response (cookies and body), so the
    /// order carries no observable weight.
    pub fn standard(config: Arc<ConsentConfig>, logger: Arc<dyn ConsentLogger>) -> Self {
        ResponsePipeline {
            interceptors: vec![
                Box::new(capture::FormCapture::new(config.clone(), logger)),
                Box::new(banner::BannerInjector::new(config)),
            ],
        }
    }

    pub fn run(&self, ctx: &RequestContext, response: &mut InterceptedResponse) {
        for interceptor in &self.interceptors {
            interceptor.on_response(ctx, response);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;
    use crate::cookie::codec::ConsentDecision;

    /// Logger that records decisions for assertions.
    #[derive(Default)]
    pub struct RecordingLogger {
        pub decisions: Mutex<Vec<ConsentDecision>>,
    }

    impl ConsentLogger for RecordingLogger {
        fn log(&self, decision: &ConsentDecision) {
            self.decisions.lock().unwrap().push(decision.clone());
        }
    }

    pub fn context() -> RequestContext {
        RequestContext {
            method: Method::GET,
            path: "/".to_owned(),
            route: Some("/".to_owned()),
            sub_request: false,
            headers: HeaderMap::new(),
            form: Vec::new(),
        }
    }

    pub fn html_response(body: &str) -> InterceptedResponse {
        InterceptedResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Some(body.to_owned()),
        }
    }
}
