// src/api/mod.rs — HTTP API server

pub mod handlers;
pub mod types;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::agents::Evaluator;
use crate::core::coordinator::Coordinator;
use crate::infra::config::{ApiConfig, WorkflowConfig};
use crate::registry::ContentRegistry;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub coordinator: Arc<Coordinator>,
    /// Direct evaluator handle for the one-shot review route.
    pub evaluator: Arc<dyn Evaluator>,
    pub registry: Arc<dyn ContentRegistry>,
    /// Per-request fallbacks for workflow knobs the caller omits.
    pub workflow_defaults: WorkflowConfig,
}

/// Build the axum router with all API routes.
pub fn build_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/content/generate", post(handlers::generate_content))
        .route("/api/v1/content/review", post(handlers::review_content))
        .route("/api/v1/content/register", post(handlers::register_content))
        .route("/api/v1/content/transfer", post(handlers::transfer_content))
        .route("/api/v1/history", get(handlers::get_history))
        .route("/api/v1/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}

/// Start the API server (blocking).
pub async fn start_server(config: &ApiConfig, state: ApiState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let router = build_router(state);

    tracing::info!("API server listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
