// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::reduction::ReductionMethod;
use crate::visualization::{Visualization, VisualizationRecord};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const NO_VALID_WORDS_MESSAGE: &str = "No valid words found in the vocabulary";
pub const NOT_FOUND_MESSAGE: &str = "Visualization not found";

/// A stored visualization as returned by POST /visualize and GET /visualizations/{id}
///
/// # Example
/// ```json
/// {
///   "visualization_id": "0f8fad5b-d9cb-469f-a165-70867728950e",
///   "method": "pca",
///   "words": ["king", "queen"],
///   "coordinates": { "king": [1.2, -0.3], "queen": [-1.2, 0.3] },
///   "colors": { "king": "#1f77b4", "queen": "#ff7f0e" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationResponse {
    pub visualization_id: String,
    pub method: ReductionMethod,
    pub words: Vec<String>,
    pub coordinates: IndexMap<String, Vec<f64>>,
    pub colors: IndexMap<String, String>,
}

impl VisualizationResponse {
    pub fn from_record(id: impl Into<String>, record: &VisualizationRecord) -> Self {
        Self {
            visualization_id: id.into(),
            method: record.method,
            words: record.words.clone(),
            coordinates: record.coordinates.clone(),
            colors: record.colors.clone(),
        }
    }
}

impl From<Visualization> for VisualizationResponse {
    fn from(visualization: Visualization) -> Self {
        Self::from_record(visualization.id, &visualization.record)
    }
}

/// Soft failure body: `{"error": "..."}` with HTTP 200
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftError {
    pub error: String,
}

/// Body of the visualization endpoints: the record, or a soft error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VisualizationResult {
    Found(VisualizationResponse),
    Error(SoftError),
}

impl VisualizationResult {
    pub fn no_valid_words() -> Self {
        VisualizationResult::Error(SoftError {
            error: NO_VALID_WORDS_MESSAGE.to_string(),
        })
    }

    pub fn not_found() -> Self {
        VisualizationResult::Error(SoftError {
            error: NOT_FOUND_MESSAGE.to_string(),
        })
    }
}

/// Response body for POST /cleanup_visualizations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanupResponse {
    pub status: String,
    pub remaining_items: usize,
}

impl CleanupResponse {
    pub fn success(remaining_items: usize) -> Self {
        Self {
            status: "success".to_string(),
            remaining_items,
        }
    }
}
