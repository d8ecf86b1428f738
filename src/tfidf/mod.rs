// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! TF-IDF vectorization over an ad-hoc document set
//!
//! Each call fits a fresh vocabulary on exactly the documents it is given and
//! returns dense, L2-normalized weight rows. Nothing is cached between calls.
//!
//! Weighting:
//! - `tf(t, d)` = raw count of `t` in `d`
//! - `idf(t)` = `ln((1 + n) / (1 + df(t))) + 1`
//! - row = `tf * idf`, divided by its L2 norm

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

/// Two or more word characters between word boundaries
pub const DEFAULT_TOKEN_PATTERN: &str = r"\b\w\w+\b";

#[derive(Error, Debug)]
pub enum TfidfError {
    #[error("Empty vocabulary: documents contain no tokens")]
    EmptyVocabulary,

    #[error("Invalid token pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Fitted TF-IDF output for one document set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfMatrix {
    /// Vocabulary in ascending lexical order
    pub feature_names: Vec<String>,
    /// One row per input document, aligned with `feature_names`
    pub rows: Vec<Vec<f64>>,
}

impl TfidfMatrix {
    pub fn n_documents(&self) -> usize {
        self.rows.len()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }
}

fn default_token_regex() -> &'static Regex {
    static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
    TOKEN_REGEX.get_or_init(|| {
        Regex::new(DEFAULT_TOKEN_PATTERN).expect("default token pattern is a valid regex")
    })
}

/// Stateless TF-IDF vectorizer
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    token_regex: Regex,
    lowercase: bool,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self {
            token_regex: default_token_regex().clone(),
            lowercase: true,
        }
    }

    /// Uses a custom token pattern instead of [`DEFAULT_TOKEN_PATTERN`]
    pub fn with_token_pattern(pattern: &str) -> Result<Self, TfidfError> {
        Ok(Self {
            token_regex: Regex::new(pattern)?,
            lowercase: true,
        })
    }

    /// Keep the original case of tokens
    pub fn preserve_case(mut self) -> Self {
        self.lowercase = false;
        self
    }

    /// Splits a document into tokens
    pub fn tokenize(&self, document: &str) -> Vec<String> {
        let text = if self.lowercase {
            document.to_lowercase()
        } else {
            document.to_string()
        };

        self.token_regex
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Fits the vocabulary on `documents` and returns their weight rows
    ///
    /// # Errors
    /// `TfidfError::EmptyVocabulary` when no document yields a token
    /// (including an empty document list).
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<TfidfMatrix, TfidfError> {
        let counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut freq = HashMap::new();
                for token in self.tokenize(doc.as_ref()) {
                    *freq.entry(token).or_insert(0) += 1;
                }
                freq
            })
            .collect();

        // Document frequency per term; BTreeMap gives the lexical order
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for freq in &counts {
            for term in freq.keys() {
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            return Err(TfidfError::EmptyVocabulary);
        }

        let n_docs = documents.len() as f64;
        let feature_names: Vec<String> = doc_freq.keys().map(|t| t.to_string()).collect();
        let idf: Vec<f64> = doc_freq
            .values()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .iter()
            .map(|freq| {
                let mut row: Vec<f64> = feature_names
                    .iter()
                    .zip(&idf)
                    .map(|(term, idf)| freq.get(term).copied().unwrap_or(0) as f64 * idf)
                    .collect();
                l2_normalize(&mut row);
                row
            })
            .collect();

        debug!(
            "TF-IDF fitted on {} documents, {} features",
            documents.len(),
            feature_names.len()
        );

        Ok(TfidfMatrix {
            feature_names,
            rows,
        })
    }
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for value in row.iter_mut() {
            *value /= norm;
        }
    }
}
