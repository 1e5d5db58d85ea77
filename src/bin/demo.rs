use axum::routing::get;
use axum::{middleware, Router};
use axum_cookie_consent::{consent_middleware, routes, ConsentConfig, ConsentState};
use maud::{html, Markup, DOCTYPE};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let state = ConsentState::new(
        ConsentConfig::new()
            .cookie_prefix("demo")
            .theme("dark")
            .exclude_path("/cookie_consent")
            .exclude_path("/health"),
    );

    let app = Router::new()
        .route("/", get(home))
        .route("/health", get(|| async { "ok" }))
        .merge(routes::router(state.clone()))
        .layer(middleware::from_fn_with_state(state, consent_middleware));

    let listener = listener().await;
    axum::serve(listener, app).await.unwrap();
}

async fn home() -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                title { "Consent demo" }
            }
            body {
                h1 { "Consent demo" }
                p { "Save a decision below and the banner goes away." }
            }
        }
    }
}

#[cfg(debug_assertions)]
async fn listener() -> TcpListener {
    TcpListener::bind("0.0.0.0:3000").await.unwrap()
}

#[cfg(not(debug_assertions))]
async fn listener() -> TcpListener {
    TcpListener::bind("0.0.0.0:80").await.unwrap()
}
