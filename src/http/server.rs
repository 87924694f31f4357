//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, CORS)
//! - Bind server to listener
//! - Stop accepting and drain on shutdown

use axum::{
    http::header::InvalidHeaderValue,
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::cors::{cors_middleware, CorsPolicy};
use crate::http::handlers;
use crate::upstream::MusicProvider;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn MusicProvider>,
    /// Deadline for each upstream call.
    pub deadline: Duration,
}

/// Errors building the server from configuration.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid CORS header value: {0}")]
    InvalidCors(#[from] InvalidHeaderValue),
}

/// HTTP server for the music façade.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server delegating to the given provider.
    pub fn new(config: ServiceConfig, provider: Arc<dyn MusicProvider>) -> Result<Self, ServerError> {
        let cors = Arc::new(CorsPolicy::from_config(&config.cors)?);
        let state = AppState {
            provider,
            deadline: Duration::from_secs(config.timeouts.request_secs),
        };

        let router = Self::build_router(state, cors);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The request deadline is enforced by the handlers, inside the CORS
    /// layer, so an expired request still answers with the JSON failure body.
    fn build_router(state: AppState, cors: Arc<CorsPolicy>) -> Router {
        let music = Router::new()
            .route("/api/music/search", get(handlers::search))
            .route("/api/music/url", get(handlers::song_url))
            .route("/api/music/detail", get(handlers::song_detail))
            .route_layer(middleware::from_fn_with_state(cors, cors_middleware))
            .with_state(state);

        Router::new()
            .merge(music)
            .route("/health", get(handlers::health))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown receiver fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
