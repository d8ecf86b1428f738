// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /visualize and GET /visualizations tests

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use fabstir_embedding_viz::{
    api::{create_app, AppState, VisualizationResponse},
    embeddings::EmbeddingTable,
    reduction::TsneConfig,
    visualization::is_hex_color,
};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::io::Cursor;
use std::sync::Arc;
use tower::util::ServiceExt;

const TABLE: &str = "\
king 0.50 0.68 -0.59 0.10 0.32 -0.12
queen 0.37 0.82 -0.51 0.24 0.41 -0.02
man 0.81 0.12 -0.22 -0.43 0.05 0.31
woman 0.72 0.35 -0.08 -0.27 0.18 0.44
child 0.60 0.40 0.11 -0.12 0.52 0.29
dog -0.21 0.33 0.78 0.05 -0.44 0.12
cat -0.33 0.25 0.81 0.14 -0.39 0.02
computer -0.71 -0.52 0.03 0.64 0.11 -0.35
technology -0.66 -0.61 -0.09 0.58 0.22 -0.41
";

fn app() -> Router {
    let table = EmbeddingTable::from_reader(Cursor::new(TABLE), None).unwrap();
    let tsne = TsneConfig {
        max_iter: 300,
        ..TsneConfig::default()
    };
    create_app(AppState::new(Arc::new(table), tsne))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_pca_scenario_is_retrievable() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/visualize",
        Some(json!({
            "words": ["king", "queen", "man", "woman"],
            "method": "pca",
            "n_components": 2
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let created: VisualizationResponse = serde_json::from_value(body).unwrap();
    assert_eq!(created.words, vec!["king", "queen", "man", "woman"]);
    assert_eq!(created.coordinates.len(), 4);
    assert!(created.coordinates.values().all(|point| point.len() == 2));
    assert!(created
        .coordinates
        .values()
        .flatten()
        .all(|v| v.is_finite()));

    let colors: HashSet<&String> = created.colors.values().collect();
    assert_eq!(colors.len(), 4);
    assert!(created.colors.values().all(|c| is_hex_color(c)));

    let (status, fetched) = send(
        &app,
        Method::GET,
        &format!("/visualizations/{}", created.visualization_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let fetched: VisualizationResponse = serde_json::from_value(fetched).unwrap();
    assert_eq!(fetched, created);

    let (_, ids) = send(&app, Method::GET, "/visualizations", None).await;
    assert_eq!(ids, json!([created.visualization_id]));
}

#[tokio::test]
async fn test_tsne_with_unknown_words_dropped() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/visualize",
        Some(json!({
            "words": ["king", "queen", "man", "woman", "child", "dog", "cat",
                      "computer", "technology", "unicorn"],
            "method": "tsne"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let created: VisualizationResponse = serde_json::from_value(body).unwrap();
    assert_eq!(created.words.len(), 9);
    assert!(!created.coordinates.contains_key("unicorn"));
    assert!(created.coordinates.values().all(|p| p.len() == 2));
    assert_eq!(created.colors["king"], "#1f77b4");
    assert_eq!(created.colors["technology"], "#bcbd22");
}

#[tokio::test]
async fn test_no_valid_words_is_soft_error() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/visualize",
        Some(json!({"words": ["zzzznotaword"], "method": "tsne"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": "No valid words found in the vocabulary"}));

    let (_, ids) = send(&app, Method::GET, "/visualizations", None).await;
    assert_eq!(ids, json!([]));
}

#[tokio::test]
async fn test_component_request_is_clamped() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/visualize",
        Some(json!({"words": ["king", "queen"], "method": "pca", "n_components": 5})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let created: VisualizationResponse = serde_json::from_value(body).unwrap();
    assert!(created.coordinates.values().all(|p| p.len() == 2));
}

#[tokio::test]
async fn test_tsne_component_request_is_clamped() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/visualize",
        Some(json!({"words": ["king", "queen"], "method": "tsne", "n_components": 5})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let created: VisualizationResponse = serde_json::from_value(body).unwrap();
    assert_eq!(created.coordinates.len(), 2);
    assert!(created.coordinates.values().all(|p| p.len() == 3));
    assert!(created.coordinates.values().flatten().all(|v| v.is_finite()));
}

#[tokio::test]
async fn test_tsne_small_input_clamps_perplexity() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/visualize",
        Some(json!({"words": ["dog", "cat", "computer"], "method": "tsne", "perplexity": 50})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("error").is_none());
    assert_eq!(body["coordinates"].as_object().unwrap().len(), 3);
}

#[tokio::test]
async fn test_single_word() {
    let app = app();
    let (_, body) = send(
        &app,
        Method::POST,
        "/visualize",
        Some(json!({"words": ["cat"], "method": "tsne"})),
    )
    .await;

    let created: VisualizationResponse = serde_json::from_value(body).unwrap();
    assert_eq!(created.coordinates["cat"].len(), 2);
    assert_eq!(created.colors["cat"], "#1f77b4");
}

#[tokio::test]
async fn test_three_dimensional_output() {
    let app = app();
    let (_, body) = send(
        &app,
        Method::POST,
        "/visualize",
        Some(json!({"words": ["king", "queen", "man", "woman"], "method": "tsne", "n_components": 3})),
    )
    .await;

    let created: VisualizationResponse = serde_json::from_value(body).unwrap();
    assert!(created.coordinates.values().all(|p| p.len() == 3));
}

#[tokio::test]
async fn test_unknown_method_falls_back_to_pca() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/visualize",
        Some(json!({"words": ["king", "queen", "man"], "method": "umap"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["method"], "pca");
}

#[tokio::test]
async fn test_zero_components_is_bad_request() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/visualize",
        Some(json!({"words": ["king"], "method": "pca", "n_components": 0})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_error");
}

#[tokio::test]
async fn test_unknown_id_is_soft_error() {
    let (status, body) = send(&app(), Method::GET, "/visualizations/does-not-exist", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": "Visualization not found"}));
}

#[tokio::test]
async fn test_each_request_gets_a_new_id() {
    let app = app();
    let request = json!({"words": ["king", "queen"], "method": "pca"});

    let (_, first) = send(&app, Method::POST, "/visualize", Some(request.clone())).await;
    let (_, second) = send(&app, Method::POST, "/visualize", Some(request)).await;

    assert_ne!(first["visualization_id"], second["visualization_id"]);
    let (_, ids) = send(&app, Method::GET, "/visualizations", None).await;
    assert_eq!(
        ids,
        json!([first["visualization_id"], second["visualization_id"]])
    );
}
