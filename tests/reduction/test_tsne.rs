// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! t-SNE behaviour through the public reduction API

use fabstir_embedding_viz::reduction::{
    reduce, DimensionReducer, ReductionError, ReductionMethod, ReductionParams, Tsne, TsneConfig,
};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `groups` tight clusters of `per_group` points in `dim` dimensions
fn clustered(groups: usize, per_group: usize, dim: usize) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(5);
    Array2::from_shape_fn((groups * per_group, dim), |(i, j)| {
        let centre = if j % groups == i / per_group { 10.0 } else { 0.0 };
        centre + rng.gen_range(-0.1..0.1)
    })
}

fn distance(points: &Array2<f64>, a: usize, b: usize) -> f64 {
    (&points.row(a) - &points.row(b))
        .iter()
        .map(|v| v * v)
        .sum::<f64>()
        .sqrt()
}

fn fast_config() -> TsneConfig {
    TsneConfig {
        max_iter: 400,
        ..TsneConfig::default()
    }
}

#[test]
fn test_clusters_are_preserved() {
    let data = clustered(3, 5, 6);
    let params = ReductionParams::new(ReductionMethod::Tsne, 2, 4);

    let out = reduce(data.view(), &params, &fast_config()).unwrap();
    assert_eq!(out.dim(), (15, 2));
    assert!(out.iter().all(|v| v.is_finite()));

    // Every point is nearer its own cluster than any other cluster
    for i in 0..15 {
        let own = (0..15)
            .filter(|&j| j != i && j / 5 == i / 5)
            .map(|j| distance(&out, i, j))
            .fold(0.0, f64::max);
        let other = (0..15)
            .filter(|&j| j / 5 != i / 5)
            .map(|j| distance(&out, i, j))
            .fold(f64::INFINITY, f64::min);
        assert!(own < other, "point {}: own {} other {}", i, own, other);
    }
}

#[test]
fn test_same_seed_same_layout() {
    let data = clustered(2, 4, 5);
    let params = ReductionParams::new(ReductionMethod::Tsne, 2, 3);

    let a = reduce(data.view(), &params, &fast_config()).unwrap();
    let b = reduce(data.view(), &params, &fast_config()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_layout_is_centered() {
    let data = clustered(2, 4, 5);
    let out = Tsne::new(TsneConfig {
        perplexity: 3.0,
        ..fast_config()
    })
    .fit_transform(data.view())
    .unwrap();

    for column in out.columns() {
        assert!(column.sum().abs() < 1e-6);
    }
}

#[test]
fn test_excess_perplexity_is_clamped_by_reduce() {
    let data = clustered(2, 2, 3);
    let params = ReductionParams::new(ReductionMethod::Tsne, 2, 30);

    let out = reduce(data.view(), &params, &fast_config()).unwrap();
    assert_eq!(out.nrows(), 4);
}

#[test]
fn test_excess_perplexity_rejected_by_reducer() {
    let data = clustered(2, 2, 3);
    let err = Tsne::new(fast_config()).fit_transform(data.view()).unwrap_err();
    assert!(matches!(err, ReductionError::InvalidPerplexity { .. }));
}

#[test]
fn test_components_capped_at_feature_count() {
    let data = clustered(2, 3, 2);
    let params = ReductionParams::new(ReductionMethod::Tsne, 5, 30);

    let out = reduce(data.view(), &params, &fast_config()).unwrap();
    assert_eq!(out.ncols(), 2);
}

#[test]
fn test_single_sample() {
    let data = Array2::from_elem((1, 4), 0.5);
    let params = ReductionParams::new(ReductionMethod::Tsne, 3, 30);

    let out = reduce(data.view(), &params, &fast_config()).unwrap();
    assert_eq!(out, Array2::<f64>::zeros((1, 3)));
}
