// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /tfidf HTTP handler

use crate::api::tfidf::{TfidfRequest, TfidfResponse};
use crate::api::ApiError;
use crate::tfidf::TfidfVectorizer;
use axum::Json;
use tracing::{debug, warn};

/// Fits TF-IDF on exactly the posted documents
///
/// # Errors
/// 400 when the list is empty or no document contains a token.
pub async fn tfidf_handler(
    Json(request): Json<TfidfRequest>,
) -> Result<Json<TfidfResponse>, ApiError> {
    request.validate()?;

    let matrix = TfidfVectorizer::new()
        .fit_transform(request.documents.as_slice())
        .map_err(|e| {
            warn!("TF-IDF request rejected: {}", e);
            ApiError::from(e)
        })?;

    debug!(
        "TF-IDF: {} documents, {} features",
        matrix.n_documents(),
        matrix.n_features()
    );
    Ok(Json(matrix.into()))
}
