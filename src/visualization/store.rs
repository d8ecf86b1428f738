// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! In-memory store of visualization results
//!
//! Records are keyed by a freshly generated UUID and kept in insertion order.
//! There is no TTL and no automatic capacity limit: the store only shrinks
//! when [`VisualizationStore::cleanup`] is called, which drops the oldest
//! records first. Lookups never change the eviction order.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut store = VisualizationStore::new();
//! let id = store.insert(record);
//! assert!(store.get(&id).is_some());
//! store.cleanup(20);
//! ```

use super::VisualizationRecord;
use lru::LruCache;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Eviction counters for monitoring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreMetrics {
    /// Records ever inserted
    pub inserted: usize,
    /// Records removed by cleanup
    pub evicted: usize,
}

pub struct VisualizationStore {
    /// Unbounded LRU used as an insertion-ordered map; only `peek` is used
    /// for reads so the order stays the insertion order
    records: LruCache<String, Arc<VisualizationRecord>>,
    metrics: StoreMetrics,
}

impl Default for VisualizationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualizationStore {
    pub fn new() -> Self {
        Self {
            records: LruCache::unbounded(),
            metrics: StoreMetrics::default(),
        }
    }

    /// Stores `record` under a new unique id and returns the id
    pub fn insert(&mut self, record: impl Into<Arc<VisualizationRecord>>) -> String {
        let mut id = Uuid::new_v4().to_string();
        while self.records.contains(&id) {
            id = Uuid::new_v4().to_string();
        }

        self.records.put(id.clone(), record.into());
        self.metrics.inserted += 1;
        debug!("Stored visualization {} ({} total)", id, self.records.len());
        id
    }

    /// Returns the record stored under `id`
    pub fn get(&self, id: &str) -> Option<Arc<VisualizationRecord>> {
        self.records.peek(id).cloned()
    }

    /// All stored ids, oldest first
    pub fn list_ids(&self) -> Vec<String> {
        self.records.iter().rev().map(|(id, _)| id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Evicts the oldest records until at most `max_items` remain
    ///
    /// Returns the number of records left.
    pub fn cleanup(&mut self, max_items: usize) -> usize {
        let mut evicted = 0;
        while self.records.len() > max_items {
            if self.records.pop_lru().is_none() {
                break;
            }
            evicted += 1;
        }

        if evicted > 0 {
            self.metrics.evicted += evicted;
            info!(
                "Evicted {} visualizations, {} remaining",
                evicted,
                self.records.len()
            );
        }

        self.records.len()
    }

    pub fn metrics(&self) -> &StoreMetrics {
        &self.metrics
    }
}
