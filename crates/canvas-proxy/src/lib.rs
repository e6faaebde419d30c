//! Echo Canvas proxy: stateless relays in front of the generative backend.
//!
//! Each route validates its required fields, forwards the request (JSON or
//! multipart) to one fixed upstream URL, and passes the upstream status and
//! body straight back. No state beyond the shared HTTP client and counters.

pub mod config;
pub mod handlers;
pub mod metrics;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::metrics::ProxyMetrics;

/// Shared state for the relay handlers.
#[derive(Clone)]
pub struct ProxyState {
    pub upstream: Arc<str>,
    pub http: reqwest::Client,
    pub metrics: Arc<ProxyMetrics>,
}

impl ProxyState {
    pub fn new(upstream: &str) -> Self {
        Self {
            upstream: Arc::from(upstream.trim_end_matches('/')),
            http: reqwest::Client::new(),
            metrics: Arc::new(ProxyMetrics::new()),
        }
    }
}

pub fn create_app(config: &ProxyConfig) -> Router {
    let state = ProxyState::new(&config.upstream_url);
    Router::new()
        .route("/api/generate-image", post(handlers::generate_image))
        .route("/api/describe-image", post(handlers::describe_image))
        .route("/api/refine-image", post(handlers::refine_image))
        .route("/api/update-image", post(handlers::update_image))
        .route("/api/sessions/{id}", get(handlers::get_session))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn run(config: ProxyConfig) {
    let app = create_app(&config);
    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .expect("Failed to bind");

    tracing::info!("Echo Canvas proxy listening on {}", config.addr);
    axum::serve(listener, app).await.expect("Server error");
}
