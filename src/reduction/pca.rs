// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Principal component analysis

use super::linalg::symmetric_eigen;
use super::{DimensionReducer, ReductionError};
use ndarray::{s, Array2, ArrayView2, Axis};

/// Linear projection onto the directions of largest variance
///
/// Works on whichever of the `n × n` Gram matrix or the `d × d` covariance
/// matrix is smaller, so a handful of 300-dimensional word vectors stays cheap.
/// Each output column is sign-normalized so that its largest-magnitude entry is
/// positive, which makes results reproducible across runs.
#[derive(Debug, Clone)]
pub struct Pca {
    n_components: usize,
}

impl Pca {
    pub fn new(n_components: usize) -> Self {
        Self { n_components }
    }
}

impl DimensionReducer for Pca {
    fn name(&self) -> &'static str {
        "pca"
    }

    fn fit_transform(&self, data: ArrayView2<f64>) -> Result<Array2<f64>, ReductionError> {
        let (n_samples, n_features) = data.dim();
        if n_samples == 0 {
            return Err(ReductionError::EmptyInput);
        }

        let max = n_samples.min(n_features);
        if self.n_components == 0 || self.n_components > max {
            return Err(ReductionError::InvalidComponents {
                requested: self.n_components,
                max,
            });
        }

        let mean = data.mean_axis(Axis(0)).ok_or(ReductionError::EmptyInput)?;
        let centered = &data - &mean;
        let k = self.n_components;

        let mut scores = if n_samples <= n_features {
            let gram = centered.dot(&centered.t());
            let (values, vectors) = symmetric_eigen(&gram);
            let mut scores = vectors.slice(s![.., ..k]).to_owned();
            for (i, mut column) in scores.axis_iter_mut(Axis(1)).enumerate() {
                column *= values[i].max(0.0).sqrt();
            }
            scores
        } else {
            let covariance = centered.t().dot(&centered);
            let (_, vectors) = symmetric_eigen(&covariance);
            centered.dot(&vectors.slice(s![.., ..k]))
        };

        for mut column in scores.axis_iter_mut(Axis(1)) {
            let pivot = column
                .iter()
                .copied()
                .max_by(|a, b| a.abs().total_cmp(&b.abs()))
                .unwrap_or(0.0);
            if pivot < 0.0 {
                column.mapv_inplace(|x| -x);
            }
        }

        Ok(scores)
    }
}
