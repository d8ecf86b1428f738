// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Static word-embedding table (GloVe text format)
//!
//! The table is loaded once at startup from a plain-text file where every line
//! holds a word followed by `D` floating-point components:
//!
//! ```text
//! king 0.50451 0.68607 -0.59517 ...
//! queen 0.37854 1.8233 -1.2648 ...
//! ```
//!
//! After loading the table is immutable and shared via `Arc`. Keys are stored
//! exactly as they appear in the file; lookups case-fold the query word.

use super::errors::EmbeddingLoadError;
use indexmap::IndexMap;
use ndarray::{Array2, ArrayView1};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Immutable word → vector table
///
/// Vectors live in one contiguous `n × D` matrix; `index` maps each word to
/// its row.
#[derive(Debug, Clone)]
pub struct EmbeddingTable {
    index: HashMap<String, usize>,
    vectors: Array2<f32>,
}

/// Words found in the table together with their stacked vectors
///
/// `words[i]` keeps the caller's original casing and corresponds to
/// `matrix.row(i)`.
#[derive(Debug, Clone)]
pub struct SelectedVectors {
    pub words: Vec<String>,
    pub matrix: Array2<f64>,
}

impl SelectedVectors {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}

impl EmbeddingTable {
    /// Loads a table from a GloVe-style text file
    ///
    /// # Arguments
    /// - `path`: Path to the vector file
    /// - `expected_dim`: When set, every vector must have exactly this many components
    ///
    /// # Errors
    /// Any unreadable file, malformed line, dimension mismatch or empty file.
    pub fn load(
        path: impl AsRef<Path>,
        expected_dim: Option<usize>,
    ) -> Result<Self, EmbeddingLoadError> {
        let path = path.as_ref();
        let path_display = path.display().to_string();
        info!("Loading embedding table from {}", path_display);

        let file = File::open(path).map_err(|source| EmbeddingLoadError::Io {
            path: path_display.clone(),
            source,
        })?;

        let table = Self::read_from(BufReader::new(file), &path_display, expected_dim)?;
        info!(
            "Loaded {} embeddings ({}D) from {}",
            table.len(),
            table.dimension(),
            path_display
        );
        Ok(table)
    }

    /// Parses a table from any buffered reader
    pub fn from_reader<R: BufRead>(
        reader: R,
        expected_dim: Option<usize>,
    ) -> Result<Self, EmbeddingLoadError> {
        Self::read_from(reader, "<reader>", expected_dim)
    }

    fn read_from<R: BufRead>(
        reader: R,
        source_name: &str,
        expected_dim: Option<usize>,
    ) -> Result<Self, EmbeddingLoadError> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut flat: Vec<f32> = Vec::new();
        let mut dimension = expected_dim;

        for (line_idx, line) in reader.lines().enumerate() {
            let line_no = line_idx + 1;
            let line = line.map_err(|source| EmbeddingLoadError::Io {
                path: source_name.to_string(),
                source,
            })?;

            let mut tokens = line.split_whitespace();
            let word = match tokens.next() {
                Some(word) => word,
                None => continue,
            };

            let vector = tokens
                .map(|token| {
                    token
                        .parse::<f32>()
                        .map_err(|_| EmbeddingLoadError::InvalidFloat {
                            line: line_no,
                            word: word.to_string(),
                            token: token.to_string(),
                        })
                })
                .collect::<Result<Vec<f32>, _>>()?;

            if vector.is_empty() {
                return Err(EmbeddingLoadError::MissingVector {
                    line: line_no,
                    word: word.to_string(),
                });
            }

            let expected = *dimension.get_or_insert(vector.len());
            if vector.len() != expected {
                return Err(EmbeddingLoadError::DimensionMismatch {
                    line: line_no,
                    word: word.to_string(),
                    expected,
                    actual: vector.len(),
                });
            }

            // Keys are case-folded; later duplicates replace earlier rows
            let key = word.to_lowercase();
            match index.get(&key) {
                Some(&row) => {
                    debug!("Duplicate word '{}' on line {}, replacing", word, line_no);
                    flat[row * expected..(row + 1) * expected].copy_from_slice(&vector);
                }
                None => {
                    let row = index.len();
                    index.insert(key, row);
                    flat.extend_from_slice(&vector);
                }
            }
        }

        let dimension = match dimension {
            Some(d) if !index.is_empty() => d,
            _ => return Err(EmbeddingLoadError::Empty),
        };

        let vectors = Array2::from_shape_vec((index.len(), dimension), flat)
            .map_err(|_| EmbeddingLoadError::Empty)?;

        Ok(Self { index, vectors })
    }

    /// Vector dimensionality shared by every entry
    pub fn dimension(&self) -> usize {
        self.vectors.ncols()
    }

    /// Number of words in the table
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Whether the case-folded word has a vector
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(&word.to_lowercase())
    }

    /// Vector for the case-folded word
    pub fn get(&self, word: &str) -> Option<ArrayView1<'_, f32>> {
        self.index
            .get(&word.to_lowercase())
            .map(|&row| self.vectors.row(row))
    }

    /// Vector for the word, or the zero vector when it is unknown
    pub fn get_or_zero(&self, word: &str) -> Vec<f32> {
        match self.get(word) {
            Some(vector) => vector.to_vec(),
            None => vec![0.0; self.dimension()],
        }
    }

    /// Looks up every word, keyed by the word exactly as given
    ///
    /// Unknown words map to the zero vector; duplicates share one key.
    pub fn lookup(&self, words: &[String]) -> IndexMap<String, Vec<f32>> {
        words
            .iter()
            .map(|word| (word.clone(), self.get_or_zero(word)))
            .collect()
    }

    /// Keeps only words present in the table and stacks their vectors
    ///
    /// Order and original casing of `words` are preserved.
    pub fn select(&self, words: &[String]) -> SelectedVectors {
        let rows: Vec<(String, usize)> = words
            .iter()
            .filter_map(|word| {
                self.index
                    .get(&word.to_lowercase())
                    .map(|&row| (word.clone(), row))
            })
            .collect();

        let mut matrix = Array2::<f64>::zeros((rows.len(), self.dimension()));
        for (i, (_, row)) in rows.iter().enumerate() {
            matrix
                .row_mut(i)
                .assign(&self.vectors.row(*row).mapv(f64::from));
        }

        SelectedVectors {
            words: rows.into_iter().map(|(word, _)| word).collect(),
            matrix,
        }
    }
}
