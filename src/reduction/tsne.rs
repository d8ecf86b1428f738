// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Exact t-SNE (t-distributed stochastic neighbour embedding)
//!
//! O(n²) per iteration, which is fine for the word lists a visualization
//! request carries. The layout is deterministic for a given `random_state`:
//! initialization uses the PCA projection and only falls back to seeded noise
//! when PCA cannot provide one.

use super::linalg::squared_distances;
use super::pca::Pca;
use super::{DimensionReducer, ReductionError};
use ndarray::{Array2, ArrayView2, Axis, Zip};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

const MACHINE_EPSILON: f64 = f64::EPSILON;
const PERPLEXITY_TOLERANCE: f64 = 1e-5;
const PERPLEXITY_STEPS: usize = 100;
const EXPLORATION_ITERATIONS: usize = 250;
const MIN_GAIN: f64 = 0.01;
const INIT_SCALE: f64 = 1e-4;

/// t-SNE settings
#[derive(Debug, Clone)]
pub struct TsneConfig {
    pub n_components: usize,
    pub perplexity: f64,
    pub early_exaggeration: f64,
    /// `None` selects `max(n / early_exaggeration / 4, 50)`
    pub learning_rate: Option<f64>,
    pub max_iter: usize,
    pub min_grad_norm: f64,
    pub random_state: u64,
}

impl Default for TsneConfig {
    fn default() -> Self {
        Self {
            n_components: 2,
            perplexity: 30.0,
            early_exaggeration: 12.0,
            learning_rate: None,
            max_iter: 1000,
            min_grad_norm: 1e-7,
            random_state: 42,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tsne {
    config: TsneConfig,
}

impl Tsne {
    pub fn new(config: TsneConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TsneConfig {
        &self.config
    }

    fn initial_layout(&self, data: ArrayView2<f64>) -> Array2<f64> {
        let k = self.config.n_components;

        if let Ok(projection) = Pca::new(k).fit_transform(data) {
            let first = projection.column(0);
            let std = first.std(0.0);
            if std > 0.0 {
                return projection.mapv(|x| x / std * INIT_SCALE);
            }
        }

        debug!("t-SNE falling back to random initialization");
        let mut rng = StdRng::seed_from_u64(self.config.random_state);
        Array2::from_shape_fn((data.nrows(), k), |_| standard_normal(&mut rng) * INIT_SCALE)
    }
}

impl DimensionReducer for Tsne {
    fn name(&self) -> &'static str {
        "tsne"
    }

    fn fit_transform(&self, data: ArrayView2<f64>) -> Result<Array2<f64>, ReductionError> {
        let n = data.nrows();
        let k = self.config.n_components;
        if n == 0 {
            return Err(ReductionError::EmptyInput);
        }
        if k == 0 {
            return Err(ReductionError::InvalidComponents {
                requested: k,
                max: data.ncols(),
            });
        }
        if n == 1 {
            return Ok(Array2::zeros((1, k)));
        }

        let perplexity = self.config.perplexity;
        if !(perplexity > 0.0 && perplexity < n as f64) {
            return Err(ReductionError::InvalidPerplexity {
                perplexity,
                n_samples: n,
            });
        }

        let distances = squared_distances(data);
        let p = joint_probabilities(&distances, perplexity);

        let mut embedding = self.initial_layout(data);
        optimize(&mut embedding, &p, &self.config);
        Ok(embedding)
    }
}

/// Symmetric joint probabilities `P` from squared distances
///
/// Each row's Gaussian bandwidth is found by binary search so that the
/// conditional distribution has the requested perplexity.
pub fn joint_probabilities(distances: &Array2<f64>, perplexity: f64) -> Array2<f64> {
    let n = distances.nrows();
    let desired_entropy = perplexity.ln();
    let mut conditional = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        let mut beta = 1.0;
        let mut beta_min = f64::NEG_INFINITY;
        let mut beta_max = f64::INFINITY;

        for _ in 0..PERPLEXITY_STEPS {
            let mut sum_p = 0.0;
            for j in 0..n {
                let value = if j == i {
                    0.0
                } else {
                    (-distances[[i, j]] * beta).exp()
                };
                conditional[[i, j]] = value;
                sum_p += value;
            }
            if sum_p == 0.0 {
                sum_p = 1e-8;
            }

            let mut weighted_distance = 0.0;
            for j in 0..n {
                conditional[[i, j]] /= sum_p;
                weighted_distance += distances[[i, j]] * conditional[[i, j]];
            }

            let entropy = sum_p.ln() + beta * weighted_distance;
            let diff = entropy - desired_entropy;
            if diff.abs() <= PERPLEXITY_TOLERANCE {
                break;
            }

            if diff > 0.0 {
                beta_min = beta;
                beta = if beta_max == f64::INFINITY {
                    beta * 2.0
                } else {
                    (beta + beta_max) / 2.0
                };
            } else {
                beta_max = beta;
                beta = if beta_min == f64::NEG_INFINITY {
                    beta / 2.0
                } else {
                    (beta + beta_min) / 2.0
                };
            }
        }
    }

    let symmetric = &conditional + &conditional.t();
    let total = symmetric.sum().max(MACHINE_EPSILON);

    let mut joint = symmetric.mapv(|x| (x / total).max(MACHINE_EPSILON));
    joint.diag_mut().fill(0.0);
    joint
}

/// KL divergence gradient of the current layout against `p`
fn gradient(embedding: &Array2<f64>, p: &Array2<f64>, exaggeration: f64, dof: f64) -> Array2<f64> {
    let n = embedding.nrows();
    let distances = squared_distances(embedding.view());

    let mut weights = distances.mapv(|d| (1.0 + d / dof).powf(-(dof + 1.0) / 2.0));
    weights.diag_mut().fill(0.0);
    let total = weights.sum().max(MACHINE_EPSILON);

    let c = 2.0 * (dof + 1.0) / dof;
    let mut grad = Array2::<f64>::zeros(embedding.raw_dim());

    for i in 0..n {
        let yi = embedding.row(i);
        let mut gi = grad.row_mut(i);
        for j in 0..n {
            if i == j {
                continue;
            }
            let q = (weights[[i, j]] / total).max(MACHINE_EPSILON);
            let coefficient = c * (exaggeration * p[[i, j]] - q) * weights[[i, j]];
            Zip::from(&mut gi)
                .and(&yi)
                .and(&embedding.row(j))
                .for_each(|g, &a, &b| *g += coefficient * (a - b));
        }
    }

    grad
}

fn optimize(embedding: &mut Array2<f64>, p: &Array2<f64>, config: &TsneConfig) {
    let n = embedding.nrows() as f64;
    let dof = (config.n_components as f64 - 1.0).max(1.0);
    let learning_rate = config
        .learning_rate
        .unwrap_or_else(|| (n / config.early_exaggeration / 4.0).max(50.0));

    let mut update = Array2::<f64>::zeros(embedding.raw_dim());
    let mut gains = Array2::<f64>::ones(embedding.raw_dim());

    for iteration in 0..config.max_iter {
        let exploring = iteration < EXPLORATION_ITERATIONS;
        let (momentum, exaggeration) = if exploring {
            (0.5, config.early_exaggeration)
        } else {
            (0.8, 1.0)
        };

        let mut grad = gradient(embedding, p, exaggeration, dof);

        Zip::from(&mut gains)
            .and(&update)
            .and(&grad)
            .for_each(|gain, &u, &g| {
                *gain = if u * g < 0.0 {
                    *gain + 0.2
                } else {
                    (*gain * 0.8).max(MIN_GAIN)
                };
            });
        grad *= &gains;

        Zip::from(&mut update)
            .and(&grad)
            .for_each(|u, &g| *u = momentum * *u - learning_rate * g);
        *embedding += &update;

        let grad_norm = grad.iter().map(|g| g * g).sum::<f64>().sqrt();
        if !exploring && grad_norm <= config.min_grad_norm {
            debug!("t-SNE converged after {} iterations", iteration + 1);
            break;
        }
    }

    // Center the final layout
    if let Some(mean) = embedding.mean_axis(Axis(0)) {
        *embedding -= &mean;
    }
}

fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // Box-Muller
    let u1: f64 = rng.gen_range(f64::MIN_POSITIVE..1.0);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}
