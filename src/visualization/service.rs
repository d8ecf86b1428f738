// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Visualization service: pipeline orchestration plus the shared store

use super::colors::assign_colors;
use super::store::{StoreMetrics, VisualizationStore};
use super::VisualizationRecord;
use crate::embeddings::EmbeddingTable;
use crate::reduction::{self, ReductionError, ReductionParams, TsneConfig};
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum VisualizationError {
    #[error("Dimensionality reduction failed: {0}")]
    Reduction(#[from] ReductionError),

    #[error("Reduction task failed: {0}")]
    TaskFailed(String),
}

/// A stored visualization and its id
#[derive(Debug, Clone)]
pub struct Visualization {
    pub id: String,
    pub record: Arc<VisualizationRecord>,
}

/// Outcome of a visualize request
#[derive(Debug, Clone)]
pub enum VisualizeOutcome {
    /// Record was built and stored
    Created(Visualization),
    /// None of the requested words are in the table; nothing was stored
    NoValidWords,
}

/// Builds a record without storing it
///
/// Returns `Ok(None)` when no word survives the table filter.
pub fn build_record<R: Rng + ?Sized>(
    table: &EmbeddingTable,
    words: &[String],
    params: &ReductionParams,
    tsne_defaults: &TsneConfig,
    rng: &mut R,
) -> Result<Option<VisualizationRecord>, ReductionError> {
    let selected = table.select(words);
    if selected.is_empty() {
        return Ok(None);
    }

    let points = reduction::reduce(selected.matrix.view(), params, tsne_defaults)?;
    let palette = assign_colors(selected.len(), rng);

    // Repeated words keep their first position and their last value
    let mut coordinates = IndexMap::with_capacity(selected.len());
    let mut colors = IndexMap::with_capacity(selected.len());
    for ((word, point), color) in selected.words.iter().zip(points.rows()).zip(palette) {
        coordinates.insert(word.clone(), point.to_vec());
        colors.insert(word.clone(), color);
    }

    Ok(Some(VisualizationRecord {
        method: params.method,
        words: selected.words,
        coordinates,
        colors,
    }))
}

/// Owns the embedding table handle and the visualization store
///
/// Store mutations (insert, cleanup) run under the write guard for their whole
/// duration; lookups take the read guard.
pub struct VisualizationService {
    table: Arc<EmbeddingTable>,
    store: RwLock<VisualizationStore>,
    tsne_defaults: TsneConfig,
}

impl VisualizationService {
    pub fn new(table: Arc<EmbeddingTable>, tsne_defaults: TsneConfig) -> Self {
        Self {
            table,
            store: RwLock::new(VisualizationStore::new()),
            tsne_defaults,
        }
    }

    pub fn table(&self) -> &Arc<EmbeddingTable> {
        &self.table
    }

    pub fn tsne_defaults(&self) -> &TsneConfig {
        &self.tsne_defaults
    }

    /// Runs the pipeline and stores the result
    ///
    /// The reduction runs on the blocking pool; the store is only locked for
    /// the final insert.
    pub async fn visualize(
        &self,
        words: Vec<String>,
        params: ReductionParams,
    ) -> Result<VisualizeOutcome, VisualizationError> {
        let table = self.table.clone();
        let tsne_defaults = self.tsne_defaults.clone();
        let requested = words.len();

        let record = tokio::task::spawn_blocking(move || {
            let mut rng = StdRng::from_entropy();
            build_record(&table, &words, &params, &tsne_defaults, &mut rng)
        })
        .await
        .map_err(|e| VisualizationError::TaskFailed(e.to_string()))??;

        let record = match record {
            Some(record) => Arc::new(record),
            None => {
                warn!("No valid words among {} requested", requested);
                return Ok(VisualizeOutcome::NoValidWords);
            }
        };

        let id = self.store.write().await.insert(record.clone());
        info!(
            "Created {} visualization {} ({} of {} words)",
            record.method,
            id,
            record.words.len(),
            requested
        );

        Ok(VisualizeOutcome::Created(Visualization { id, record }))
    }

    pub async fn get(&self, id: &str) -> Option<Arc<VisualizationRecord>> {
        self.store.read().await.get(id)
    }

    pub async fn list_ids(&self) -> Vec<String> {
        self.store.read().await.list_ids()
    }

    /// Evicts the oldest visualizations down to `max_items`; returns the count left
    pub async fn cleanup(&self, max_items: usize) -> usize {
        self.store.write().await.cleanup(max_items)
    }

    pub async fn stored_count(&self) -> usize {
        self.store.read().await.len()
    }

    /// Insert and eviction counters since startup
    pub async fn store_metrics(&self) -> StoreMetrics {
        self.store.read().await.metrics().clone()
    }
}
