//! `api` crate — HTTP REST API layer.
//!
//! Exposes:
//!   GET    /items
//!   POST   /items
//!   GET    /items/{id}
//!   PUT    /items/{id}
//!   DELETE /items/{id}

pub mod error;
pub mod handlers;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use db::ItemRepository;

pub use error::ApiError;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn ItemRepository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn ItemRepository>) -> Self {
        Self { repo }
    }
}

/// Server-level knobs that don't belong to any single handler.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Per-request deadline. When it fires the handler future is dropped,
    /// which cancels any in-flight query.
    pub request_timeout: Option<Duration>,
}

/// Build the application router.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let mut app = Router::new()
        .route("/", get(|| async { "Hello" }))
        .route(
            "/items",
            get(handlers::items::list).post(handlers::items::create),
        )
        .route(
            "/items/:id",
            get(handlers::items::get)
                .put(handlers::items::replace)
                .delete(handlers::items::delete),
        )
        .with_state(state);

    if let Some(timeout) = config.request_timeout {
        app = app.layer(TimeoutLayer::new(timeout));
    }

    app.layer(TraceLayer::new_for_http())
}

/// Bind `bind` and serve until `shutdown` resolves.
pub async fn serve<F>(
    bind: &str,
    state: AppState,
    config: &ServerConfig,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state, config))
        .with_graceful_shutdown(shutdown)
        .await
}
