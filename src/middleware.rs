use axum::body::{to_bytes, Body};
use axum::extract::{MatchedPath, Request, State};
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::pipeline::{InterceptedResponse, RequestContext};
use crate::routes::ConsentState;

/// Marker extension for internally dispatched requests. Insert it into a
/// request before handing it to an inner service and the banner will stay
/// out of the produced response.
#[derive(Clone, Copy, Debug)]
pub struct SubRequest;

/// Largest urlencoded request body the layer buffers; the consent form is
/// a handful of fields.
const MAX_FORM_BYTES: usize = 16 * 1024;

/// Largest HTML response body the layer buffers for injection.
const MAX_PAGE_BYTES: usize = 2 * 1024 * 1024;

/// Response layer running the consent pipeline over every response
/// produced beneath it.
///
/// Wire it with `axum::middleware::from_fn_with_state`:
///
/// ```no_run
/// use axum::{middleware, routing::get, Router};
/// use axum_cookie_consent::{consent_middleware, routes, ConsentConfig, ConsentState};
///
/// let state = ConsentState::new(ConsentConfig::new());
/// let app: Router = Router::new()
///     .route("/", get(|| async { "home" }))
///     .merge(routes::router(state.clone()))
///     .layer(middleware::from_fn_with_state(state, consent_middleware));
/// ```
pub async fn consent_middleware(
    State(state): State<ConsentState>,
    request: Request,
    next: Next,
) -> Response {
    let sub_request = request.extensions().get::<SubRequest>().is_some();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned());
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let headers = request.headers().clone();

    let (request, form) = match buffer_form(request).await {
        Ok(buffered) => buffered,
        Err(response) => return response,
    };

    let ctx = RequestContext {
        method,
        path,
        route,
        sub_request,
        headers,
        form,
    };

    let response = next.run(request).await;
    run_pipeline(&state, &ctx, response).await
}

/// Read and re-attach an urlencoded request body so the form capture can
/// see what the handler saw.
async fn buffer_form(request: Request) -> Result<(Request, Vec<(String, String)>), Response> {
    if request.method() != Method::POST || !is_urlencoded(request.headers()) {
        return Ok((request, Vec::new()));
    }

    let (parts, body) = request.into_parts();
    let bytes = match to_bytes(body, MAX_FORM_BYTES).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!(%error, "failed to buffer an urlencoded request body");
            return Err(StatusCode::BAD_REQUEST.into_response());
        }
    };

    let form = url::form_urlencoded::parse(&bytes).into_owned().collect();
    Ok((Request::from_parts(parts, Body::from(bytes)), form))
}

async fn run_pipeline(state: &ConsentState, ctx: &RequestContext, response: Response) -> Response {
    let (mut parts, body) = response.into_parts();

    // Non-HTML responses keep their body untouched (and unbuffered); the
    // pipeline still sees the headers so cookie writes reach redirects.
    if !is_html(&parts.headers) || too_large(&parts.headers) {
        let mut intercepted = InterceptedResponse {
            status: parts.status,
            headers: std::mem::take(&mut parts.headers),
            body: None,
        };
        state.pipeline().run(ctx, &mut intercepted);
        parts.headers = intercepted.headers;
        return Response::from_parts(parts, body);
    }

    let bytes = match to_bytes(body, MAX_PAGE_BYTES).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!(%error, "failed to buffer an HTML response body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let text = match String::from_utf8(bytes.to_vec()) {
        Ok(text) => Some(text),
        // Declared HTML but not UTF-8: pass the bytes through untouched.
        Err(_) => None,
    };

    let passthrough = text.is_none();
    let mut intercepted = InterceptedResponse {
        status: parts.status,
        headers: std::mem::take(&mut parts.headers),
        body: text,
    };
    state.pipeline().run(ctx, &mut intercepted);
    parts.headers = intercepted.headers;

    if passthrough {
        return Response::from_parts(parts, Body::from(bytes));
    }

    let body = intercepted.body.unwrap_or_default();
    if let Ok(length) = HeaderValue::from_str(&body.len().to_string()) {
        parts.headers.insert(header::CONTENT_LENGTH, length);
    }
    Response::from_parts(parts, Body::from(body))
}

fn is_urlencoded(headers: &HeaderMap) -> bool {
    content_type_starts_with(headers, "application/x-www-form-urlencoded")
}

fn is_html(headers: &HeaderMap) -> bool {
    content_type_starts_with(headers, "text/html")
}

fn content_type_starts_with(headers: &HeaderMap, prefix: &str) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .trim_start()
                .to_ascii_lowercase()
                .starts_with(prefix)
        })
}

fn too_large(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<usize>().ok())
        .is_some_and(|length| length > MAX_PAGE_BYTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_content_type(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn recognizes_html_content_types() {
        assert!(is_html(&headers_with_content_type("text/html")));
        assert!(is_html(&headers_with_content_type(
            "text/html; charset=utf-8"
        )));
        assert!(is_html(&headers_with_content_type("TEXT/HTML")));
        assert!(!is_html(&headers_with_content_type("application/json")));
        assert!(!is_html(&HeaderMap::new()));
    }

    #[test]
    fn recognizes_urlencoded_content_types() {
        assert!(is_urlencoded(&headers_with_content_type(
            "application/x-www-form-urlencoded"
        )));
        assert!(!is_urlencoded(&headers_with_content_type(
            "multipart/form-data; boundary=x"
        )));
    }

    #[test]
    fn oversized_declared_lengths_are_skipped() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_LENGTH,
            HeaderValue::from_str(&(MAX_PAGE_BYTES + 1).to_string()).unwrap(),
        );
        assert!(too_large(&headers));
        assert!(!too_large(&HeaderMap::new()));
    }
}
