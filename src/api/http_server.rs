// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::embeddings::embeddings_handler;
use super::tfidf::tfidf_handler;
use super::visualize::{
    cleanup_visualizations_handler, get_visualization_handler, list_visualizations_handler,
    visualize_handler,
};
use crate::config::ServerConfig;
use crate::embeddings::EmbeddingTable;
use crate::reduction::TsneConfig;
use crate::visualization::VisualizationService;

/// Shared handler state
///
/// The table is read-only after startup; all mutable state lives in the
/// visualization service.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<EmbeddingTable>,
    pub visualizations: Arc<VisualizationService>,
}

impl AppState {
    pub fn new(table: Arc<EmbeddingTable>, tsne_defaults: TsneConfig) -> Self {
        let visualizations = Arc::new(VisualizationService::new(table.clone(), tsne_defaults));
        Self {
            table,
            visualizations,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    /// Build and feature info
    pub version: serde_json::Value,
    pub vocabulary_size: usize,
    pub dimension: usize,
    pub stored_visualizations: usize,
    /// Visualizations created since startup
    pub visualizations_created: usize,
    /// Visualizations removed by cleanup since startup
    pub visualizations_evicted: usize,
}

/// Builds the router with CORS open to any origin, method and header
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Embedding lookup
        .route("/embeddings", post(embeddings_handler))
        // TF-IDF over the posted documents
        .route("/tfidf", post(tfidf_handler))
        // Visualizations
        .route("/visualize", post(visualize_handler))
        .route("/visualizations", get(list_visualizations_handler))
        .route("/visualizations/:id", get(get_visualization_handler))
        .route(
            "/cleanup_visualizations",
            post(cleanup_visualizations_handler),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves until Ctrl-C
pub async fn start_server(
    config: &ServerConfig,
    state: AppState,
) -> anyhow::Result<()> {
    let app = create_app(state);

    let addr = config.bind_address().parse::<SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let metrics = state.visualizations.store_metrics().await;
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: crate::version::get_version_info(),
        vocabulary_size: state.table.len(),
        dimension: state.table.dimension(),
        stored_visualizations: state.visualizations.stored_count().await,
        visualizations_created: metrics.inserted,
        visualizations_evicted: metrics.evicted,
    })
}
