// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Visualization HTTP handlers

use crate::api::http_server::AppState;
use crate::api::visualize::{
    CleanupParams, CleanupResponse, VisualizationResponse, VisualizationResult, VisualizeRequest,
};
use crate::api::ApiError;
use crate::reduction::ReductionMethod;
use crate::visualization::VisualizeOutcome;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{debug, info};

/// POST /visualize
///
/// Words missing from the table are dropped. If none remain the body is
/// `{"error": "No valid words found in the vocabulary"}` with status 200 and
/// nothing is stored.
///
/// # Errors
/// 400 for zero `n_components`/`perplexity`, 500 if the reduction fails.
pub async fn visualize_handler(
    State(state): State<AppState>,
    Json(request): Json<VisualizeRequest>,
) -> Result<Json<VisualizationResult>, ApiError> {
    request.validate()?;

    if !ReductionMethod::is_recognized(&request.method) {
        debug!("Unrecognized method {:?}, using PCA", request.method);
    }

    let params = request.reduction_params();
    let outcome = state
        .visualizations
        .visualize(request.words, params)
        .await?;

    let result = match outcome {
        VisualizeOutcome::Created(visualization) => {
            VisualizationResult::Found(VisualizationResponse::from(visualization))
        }
        VisualizeOutcome::NoValidWords => VisualizationResult::no_valid_words(),
    };
    Ok(Json(result))
}

/// GET /visualizations/{id}
///
/// Unknown ids answer `{"error": "Visualization not found"}` with status 200.
pub async fn get_visualization_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<VisualizationResult> {
    match state.visualizations.get(&id).await {
        Some(record) => Json(VisualizationResult::Found(VisualizationResponse::from_record(
            id, &record,
        ))),
        None => {
            debug!("Visualization {} not found", id);
            Json(VisualizationResult::not_found())
        }
    }
}

/// GET /visualizations: stored ids, oldest first
pub async fn list_visualizations_handler(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.visualizations.list_ids().await)
}

/// POST /cleanup_visualizations?max_items=N
pub async fn cleanup_visualizations_handler(
    State(state): State<AppState>,
    Query(params): Query<CleanupParams>,
) -> Json<CleanupResponse> {
    let remaining = state.visualizations.cleanup(params.max_items).await;
    info!(
        "Cleanup requested (max_items={}), {} visualizations remaining",
        params.max_items, remaining
    );
    Json(CleanupResponse::success(remaining))
}
