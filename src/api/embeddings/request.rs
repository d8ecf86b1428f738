// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};

/// Request body for POST /embeddings
///
/// # Example
/// ```json
/// { "words": ["cat", "dog", "quantum"] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsRequest {
    pub words: Vec<String>,
}
