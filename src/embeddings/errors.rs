// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for loading the static embedding table
//!
//! Any of these is fatal at startup: the node refuses to serve without a
//! complete, consistent table.

use thiserror::Error;

/// Errors that can occur while reading a GloVe-style vector file
#[derive(Error, Debug)]
pub enum EmbeddingLoadError {
    /// File could not be opened or read
    #[error("Failed to read embedding file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Line has a word but no vector components
    #[error("Line {line}: word '{word}' has no vector components")]
    MissingVector { line: usize, word: String },

    /// A vector component is not a valid float
    #[error("Line {line}: invalid float '{token}' for word '{word}'")]
    InvalidFloat {
        line: usize,
        word: String,
        token: String,
    },

    /// Line dimensionality differs from the rest of the table
    #[error("Line {line}: dimension mismatch for word '{word}': expected {expected}D, got {actual}D")]
    DimensionMismatch {
        line: usize,
        word: String,
        expected: usize,
        actual: usize,
    },

    /// The file contained no vectors at all
    #[error("Embedding file contains no vectors")]
    Empty,
}

impl EmbeddingLoadError {
    /// 1-based line number the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            EmbeddingLoadError::MissingVector { line, .. }
            | EmbeddingLoadError::InvalidFloat { line, .. }
            | EmbeddingLoadError::DimensionMismatch { line, .. } => Some(*line),
            EmbeddingLoadError::Io { .. } | EmbeddingLoadError::Empty => None,
        }
    }
}
