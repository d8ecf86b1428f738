// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::reduction::TsneConfig;
use clap::Parser;
use std::path::PathBuf;

/// Server configuration
///
/// Every flag falls back to an environment variable; `.env` is read by the
/// binaries before parsing.
#[derive(Parser, Debug, Clone)]
#[command(name = "fabstir-embedding-viz")]
#[command(about = "Word embedding, TF-IDF and visualization API", long_about = None)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// GloVe-format embedding file (`word v1 v2 ...` per line)
    #[arg(long, env = "GLOVE_PATH", default_value = "glove.6B.100d.txt")]
    pub embeddings_path: PathBuf,

    /// Reject the file unless every vector has this many components
    #[arg(long, env = "EMBEDDING_DIM")]
    pub embedding_dim: Option<usize>,

    /// Seed for t-SNE initialisation
    #[arg(long, env = "TSNE_RANDOM_STATE", default_value_t = 42)]
    pub tsne_random_state: u64,

    /// t-SNE optimisation iterations
    #[arg(long, env = "TSNE_MAX_ITER", default_value_t = 1000)]
    pub tsne_max_iter: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            embeddings_path: PathBuf::from("glove.6B.100d.txt"),
            embedding_dim: None,
            tsne_random_state: 42,
            tsne_max_iter: 1000,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// t-SNE settings that requests do not override
    pub fn tsne_config(&self) -> TsneConfig {
        TsneConfig {
            max_iter: self.tsne_max_iter,
            random_state: self.tsne_random_state,
            ..TsneConfig::default()
        }
    }
}
