// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Response body for POST /embeddings
///
/// Keys are the words exactly as requested (input order); unknown words map
/// to the zero vector.
///
/// # Example
/// ```json
/// { "embeddings": { "cat": [0.23, -0.11, ...], "unicorn": [0.0, 0.0, ...] } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsResponse {
    pub embeddings: IndexMap<String, Vec<f32>>,
}

impl EmbeddingsResponse {
    /// Dimensionality of the returned vectors (0 when empty)
    pub fn dimension(&self) -> usize {
        self.embeddings.values().next().map(Vec::len).unwrap_or(0)
    }
}
