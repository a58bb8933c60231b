//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Mount the API under the configured base path
//! - Wire up middleware (request ID, tracing, timeout, CORS, metrics)
//! - Serve the optional static frontend
//! - Bind server to listener and shut down gracefully

use axum::{
    middleware,
    routing::get,
    Router,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::DictionaryConfig;
use crate::dictionary::WordStore;
use crate::http::handlers;
use crate::http::request::{request_id_header, UuidRequestId};
use crate::observability::{metrics, tracing::make_request_span};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<WordStore>,
}

/// HTTP server for the dictionary API.
pub struct HttpServer {
    router: Router,
    config: DictionaryConfig,
}

impl HttpServer {
    /// Create a new HTTP server over an already loaded word store.
    pub fn new(config: DictionaryConfig, store: Arc<WordStore>) -> Self {
        let state = AppState { store };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Routes relative to the API base path.
    fn api_routes() -> Router<AppState> {
        Router::new()
            .route("/dictionary/words", get(handlers::list_words))
            .route("/dictionary/search", get(handlers::search_words))
            .route("/dictionary/word/{id}", get(handlers::get_word))
            .route("/dictionary/alphabets", get(handlers::list_alphabets))
            .route("/dictionary/alphabet/{letter}", get(handlers::words_by_alphabet))
            .route("/alphabets", get(handlers::list_alphabets))
            .route("/alphabets/{letter}", get(handlers::words_by_alphabet))
            .route("/health", get(handlers::health))
            .route_layer(middleware::from_fn(metrics::track_metrics))
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &DictionaryConfig, state: AppState) -> Router {
        let api = Self::api_routes();
        let mut router = if config.api.base_path.is_empty() {
            api
        } else {
            Router::new().nest(&config.api.base_path, api)
        };

        router = match &config.frontend.static_dir {
            Some(dir) => {
                let index = Path::new(dir).join("index.html");
                let spa = ServeDir::new(dir).not_found_service(ServeFile::new(index));
                router.fallback_service(spa)
            }
            None => router.fallback(handlers::route_not_found),
        };

        let mut router = router
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        if config.api.cors_permissive {
            router = router.layer(CorsLayer::permissive());
        }

        router
            .layer(PropagateRequestIdLayer::new(request_id_header()))
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(SetRequestIdLayer::new(request_id_header(), UuidRequestId))
    }

    /// A handle to the router, for driving it without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            base_path = %self.config.api.base_path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
