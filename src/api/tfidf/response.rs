// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::tfidf::TfidfMatrix;
use serde::{Deserialize, Serialize};

/// Response body for POST /tfidf
///
/// # Example
/// ```json
/// {
///   "feature_names": ["and", "document", "first"],
///   "tfidf_vectors": [[0.0, 0.469, 0.580], [0.613, 0.0, 0.0]]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfResponse {
    pub feature_names: Vec<String>,
    pub tfidf_vectors: Vec<Vec<f64>>,
}

impl From<TfidfMatrix> for TfidfResponse {
    fn from(matrix: TfidfMatrix) -> Self {
        Self {
            feature_names: matrix.feature_names,
            tfidf_vectors: matrix.rows,
        }
    }
}
