// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding visualization pipeline
//!
//! Maps a word list through the embedding table, reduces the vectors to 2D/3D,
//! assigns one colour per word and keeps the result in a
//! [`VisualizationStore`] under a generated id.

pub mod colors;
pub mod service;
pub mod store;

pub use colors::{assign_colors, is_hex_color, PALETTE};
pub use service::{build_record, Visualization, VisualizationError, VisualizationService, VisualizeOutcome};
pub use store::{StoreMetrics, VisualizationStore};

use crate::reduction::ReductionMethod;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Result of one visualize request, immutable once stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationRecord {
    pub method: ReductionMethod,
    /// Words found in the embedding table, in request order
    pub words: Vec<String>,
    /// Word → point (`n_components` scalars)
    pub coordinates: IndexMap<String, Vec<f64>>,
    /// Word → `#rrggbb`
    pub colors: IndexMap<String, String>,
}

impl VisualizationRecord {
    /// Dimensionality of the stored points
    pub fn dimensions(&self) -> usize {
        self.coordinates.values().next().map(Vec::len).unwrap_or(0)
    }
}
