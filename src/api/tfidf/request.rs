// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::api::ApiError;
use serde::{Deserialize, Serialize};

/// Request body for POST /tfidf
///
/// # Example
/// ```json
/// { "documents": ["This is the first document.", "And the second one."] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfRequest {
    pub documents: Vec<String>,
}

impl TfidfRequest {
    /// At least one document is required
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.documents.is_empty() {
            return Err(ApiError::validation(
                "documents",
                "documents array must contain at least 1 item",
            ));
        }
        Ok(())
    }
}
