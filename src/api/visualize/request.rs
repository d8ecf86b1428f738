// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::api::ApiError;
use crate::reduction::{ReductionMethod, ReductionParams, DEFAULT_N_COMPONENTS, DEFAULT_PERPLEXITY};
use serde::{Deserialize, Serialize};

/// Default bound for POST /cleanup_visualizations
pub const DEFAULT_MAX_ITEMS: usize = 20;

/// Request body for POST /visualize
///
/// # Fields
/// - `words`: Words to place; words missing from the table are dropped
/// - `method`: `"tsne"` or `"pca"`; any other value selects PCA
/// - `perplexity`: t-SNE neighbourhood size (default 30, clamped to the word count)
/// - `n_components`: Output dimensionality (default 2, clamped to what the data supports)
///
/// # Example
/// ```json
/// { "words": ["king", "queen", "man", "woman"], "method": "pca", "n_components": 2 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizeRequest {
    pub words: Vec<String>,
    pub method: String,
    #[serde(default)]
    pub perplexity: Option<u32>,
    #[serde(default)]
    pub n_components: Option<usize>,
}

impl VisualizeRequest {
    /// Rejects explicit zero values for `perplexity` and `n_components`
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.n_components == Some(0) {
            return Err(ApiError::validation(
                "n_components",
                "n_components must be at least 1",
            ));
        }
        if self.perplexity == Some(0) {
            return Err(ApiError::validation(
                "perplexity",
                "perplexity must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn method(&self) -> ReductionMethod {
        ReductionMethod::parse_or_default(&self.method)
    }

    pub fn perplexity(&self) -> u32 {
        self.perplexity.unwrap_or(DEFAULT_PERPLEXITY)
    }

    pub fn n_components(&self) -> usize {
        self.n_components.unwrap_or(DEFAULT_N_COMPONENTS)
    }

    /// Reduction parameters before clamping to the data
    pub fn reduction_params(&self) -> ReductionParams {
        ReductionParams::new(self.method(), self.n_components(), self.perplexity())
    }
}

/// Query string of POST /cleanup_visualizations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupParams {
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}

impl Default for CleanupParams {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}
