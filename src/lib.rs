// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod embeddings;
pub mod reduction;
pub mod tfidf;
pub mod version;
pub mod visualization;

pub use api::{create_app, start_server, AppState};
pub use config::ServerConfig;
pub use embeddings::{EmbeddingLoadError, EmbeddingTable};
pub use reduction::{DimensionReducer, ReductionMethod, ReductionParams, TsneConfig};
pub use tfidf::{TfidfMatrix, TfidfVectorizer};
pub use visualization::{VisualizationRecord, VisualizationService, VisualizationStore};
