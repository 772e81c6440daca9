// ABOUTME: HTTP front end for reelsnap: router construction, shared state and the serve loop.
// ABOUTME: Exposes POST /api/get-video, the companion form at / and a health check, behind CORS and rate limiting.

//! reelsnap HTTP server.
//!
//! Routes:
//! - `POST /api/get-video` with `{"url": "..."}` returns `{"videoUrl": "..."}`.
//! - `GET /` serves a small form that calls the endpoint above.
//! - `GET /health` returns `{"status": "ok"}`.
//!
//! Every route is rate limited per client IP. CORS allows any origin.

pub mod config;
pub mod error;
pub mod rate_limit;
pub mod routes;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware, Router};
use reelsnap_core::Client;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use crate::config::{RateLimitConfig, ServerConfig};
pub use crate::error::ApiError;
pub use crate::rate_limit::RateLimiter;

/// State shared by every request.
#[derive(Debug)]
pub struct AppState {
    pub client: Client,
    pub limiter: RateLimiter,
}

impl AppState {
    pub fn new(client: Client, limiter: RateLimiter) -> Self {
        Self { client, limiter }
    }
}

/// Build the axum Router with all endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::form))
        .route("/health", get(routes::health))
        .route("/api/get-video", post(routes::get_video))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            rate_limit::enforce,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let client = Client::builder().timeout(config.timeout).build()?;
    let state = Arc::new(AppState::new(client, RateLimiter::new(config.rate_limit)));

    let listener = TcpListener::bind(config.addr()).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        max_requests = config.rate_limit.max_requests,
        window_secs = config.rate_limit.window.as_secs(),
        "reelsnap server listening"
    );

    run(listener, state, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let app = router(state).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
