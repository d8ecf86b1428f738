// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Dimensionality reduction for embedding visualization
//!
//! Two stateless reducers sit behind [`DimensionReducer`]:
//! - [`Pca`]: variance-preserving linear projection
//! - [`Tsne`]: neighbour-preserving nonlinear embedding
//!
//! [`ReductionParams::clamped`] adapts a request to what the data supports
//! before a reducer is built, so callers never hand a reducer more structure
//! than the sample count allows.

pub mod linalg;
pub mod pca;
pub mod tsne;

pub use pca::Pca;
pub use tsne::{Tsne, TsneConfig};

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const DEFAULT_PERPLEXITY: u32 = 30;
pub const DEFAULT_N_COMPONENTS: usize = 2;
/// Upper bound on t-SNE output dimensionality
pub const MAX_TSNE_COMPONENTS: usize = 3;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReductionError {
    #[error("Cannot reduce an empty matrix")]
    EmptyInput,

    #[error("Invalid number of components: requested {requested}, supported 1..={max}")]
    InvalidComponents { requested: usize, max: usize },

    #[error("Perplexity {perplexity} must be positive and below the sample count {n_samples}")]
    InvalidPerplexity { perplexity: f64, n_samples: usize },
}

/// Contract for dimensionality reduction backends
pub trait DimensionReducer: Send + Sync {
    /// Short method name ("pca", "tsne")
    fn name(&self) -> &'static str;

    /// Fits on `data` (`n_samples × n_features`) and returns `n_samples × k` coordinates
    fn fit_transform(&self, data: ArrayView2<f64>) -> Result<Array2<f64>, ReductionError>;
}

/// Reduction method requested by a client
///
/// Parsing is case-insensitive. `"tsne"` selects t-SNE; any other value,
/// including unknown strings, selects PCA. This default is deliberate and
/// kept explicit here rather than left to an `else` branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ReductionMethod {
    Tsne,
    Pca,
}

impl ReductionMethod {
    /// Parses a method name, defaulting to PCA for anything that is not "tsne"
    pub fn parse_or_default(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("tsne") {
            ReductionMethod::Tsne
        } else {
            ReductionMethod::Pca
        }
    }

    /// Whether `value` names a method exactly (no fallback involved)
    pub fn is_recognized(value: &str) -> bool {
        let value = value.trim();
        value.eq_ignore_ascii_case("tsne") || value.eq_ignore_ascii_case("pca")
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReductionMethod::Tsne => "tsne",
            ReductionMethod::Pca => "pca",
        }
    }
}

impl From<String> for ReductionMethod {
    fn from(value: String) -> Self {
        Self::parse_or_default(&value)
    }
}

impl From<&str> for ReductionMethod {
    fn from(value: &str) -> Self {
        Self::parse_or_default(value)
    }
}

impl fmt::Display for ReductionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of one reduction
#[derive(Debug, Clone, PartialEq)]
pub struct ReductionParams {
    pub method: ReductionMethod,
    pub n_components: usize,
    /// Only used by t-SNE
    pub perplexity: f64,
}

impl ReductionParams {
    pub fn new(method: ReductionMethod, n_components: usize, perplexity: u32) -> Self {
        Self {
            method,
            n_components,
            perplexity: f64::from(perplexity),
        }
    }

    /// Adapts the request to `n_samples × n_features` input
    ///
    /// - t-SNE: perplexity becomes `min(perplexity, n_samples - 1)`, or `1`
    ///   with a single sample; components are capped at `n_features` and at
    ///   [`MAX_TSNE_COMPONENTS`].
    /// - PCA: components are capped at `min(n_samples, n_features)`.
    ///
    /// Components never drop below one.
    pub fn clamped(&self, n_samples: usize, n_features: usize) -> Self {
        let mut params = self.clone();
        match self.method {
            ReductionMethod::Tsne => {
                params.perplexity = if n_samples > 1 {
                    self.perplexity.min((n_samples - 1) as f64)
                } else {
                    1.0
                };
                params.n_components = self
                    .n_components
                    .min(n_features)
                    .min(MAX_TSNE_COMPONENTS);
            }
            ReductionMethod::Pca => {
                params.n_components = self.n_components.min(n_samples).min(n_features);
            }
        }
        params.n_components = params.n_components.max(1);
        params
    }

    /// Builds the reducer for these parameters
    pub fn reducer(&self, tsne_defaults: &TsneConfig) -> Box<dyn DimensionReducer> {
        match self.method {
            ReductionMethod::Tsne => Box::new(Tsne::new(TsneConfig {
                n_components: self.n_components,
                perplexity: self.perplexity,
                ..tsne_defaults.clone()
            })),
            ReductionMethod::Pca => Box::new(Pca::new(self.n_components)),
        }
    }
}

/// Clamps `params` to `data` and runs the matching reducer
pub fn reduce(
    data: ArrayView2<f64>,
    params: &ReductionParams,
    tsne_defaults: &TsneConfig,
) -> Result<Array2<f64>, ReductionError> {
    let (n_samples, n_features) = data.dim();
    if n_samples == 0 {
        return Err(ReductionError::EmptyInput);
    }

    let effective = params.clamped(n_samples, n_features);
    let reducer = effective.reducer(tsne_defaults);
    tracing::debug!(
        "Reducing {}x{} with {} to {} components",
        n_samples,
        n_features,
        reducer.name(),
        effective.n_components
    );
    reducer.fit_transform(data)
}
