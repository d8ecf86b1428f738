// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod embeddings;
pub mod errors;
pub mod http_server;
pub mod tfidf;
pub mod visualize;

pub use embeddings::{embeddings_handler, EmbeddingsRequest, EmbeddingsResponse};
pub use errors::{ApiError, ErrorResponse};
pub use http_server::{create_app, start_server, AppState, HealthResponse};
pub use tfidf::{tfidf_handler, TfidfRequest, TfidfResponse};
pub use visualize::{
    cleanup_visualizations_handler, get_visualization_handler, list_visualizations_handler,
    visualize_handler, CleanupParams, CleanupResponse, SoftError, VisualizationResponse,
    VisualizationResult, VisualizeRequest,
};
