// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /embeddings HTTP handler

use crate::api::embeddings::{EmbeddingsRequest, EmbeddingsResponse};
use crate::api::http_server::AppState;
use axum::{extract::State, Json};
use tracing::debug;

/// Looks up every requested word in the embedding table
///
/// Never fails: words missing from the table get the zero vector.
pub async fn embeddings_handler(
    State(state): State<AppState>,
    Json(request): Json<EmbeddingsRequest>,
) -> Json<EmbeddingsResponse> {
    let embeddings = state.table.lookup(&request.words);
    let known = request
        .words
        .iter()
        .filter(|word| state.table.contains(word))
        .count();
    debug!(
        "Embedding lookup: {} words, {} found in table",
        request.words.len(),
        known
    );

    Json(EmbeddingsResponse { embeddings })
}
