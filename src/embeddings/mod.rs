// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Static word-embedding table
//!
//! Loaded once at startup from a GloVe-style text file and shared read-only
//! by the HTTP handlers and the visualization pipeline.

pub mod errors;
pub mod table;

pub use errors::EmbeddingLoadError;
pub use table::{EmbeddingTable, SelectedVectors};
