// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /cleanup_visualizations tests

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use fabstir_embedding_viz::{
    api::{create_app, AppState, CleanupResponse},
    embeddings::EmbeddingTable,
    reduction::TsneConfig,
};
use serde_json::{json, Value};
use std::io::Cursor;
use std::sync::Arc;
use tower::util::ServiceExt;

fn app() -> Router {
    let table = EmbeddingTable::from_reader(
        Cursor::new("king 0.5 0.7 0.1\nqueen 0.4 0.9 0.2\nman 0.9 0.1 0.4\n"),
        None,
    )
    .unwrap();
    create_app(AppState::new(Arc::new(table), TsneConfig::default()))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Value {
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
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create(app: &Router, count: usize) -> Vec<String> {
    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        let body = call(
            app,
            Method::POST,
            "/visualize",
            Some(json!({"words": ["king", "queen", "man"], "method": "pca"})),
        )
        .await;
        ids.push(body["visualization_id"].as_str().unwrap().to_string());
    }
    ids
}

#[tokio::test]
async fn test_cleanup_keeps_newest() {
    let app = app();
    let ids = create(&app, 5).await;

    // Reading the oldest must not protect it from eviction
    call(&app, Method::GET, &format!("/visualizations/{}", ids[0]), None).await;

    let body = call(&app, Method::POST, "/cleanup_visualizations?max_items=2", None).await;
    let response: CleanupResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response, CleanupResponse::success(2));

    let remaining = call(&app, Method::GET, "/visualizations", None).await;
    assert_eq!(remaining, json!(ids[3..].to_vec()));

    let evicted = call(&app, Method::GET, &format!("/visualizations/{}", ids[0]), None).await;
    assert_eq!(evicted, json!({"error": "Visualization not found"}));
}

#[tokio::test]
async fn test_cleanup_default_bound() {
    let app = app();
    create(&app, 3).await;

    let body = call(&app, Method::POST, "/cleanup_visualizations", None).await;
    assert_eq!(body, json!({"status": "success", "remaining_items": 3}));
}

#[tokio::test]
async fn test_cleanup_to_zero() {
    let app = app();
    create(&app, 2).await;

    let body = call(&app, Method::POST, "/cleanup_visualizations?max_items=0", None).await;
    assert_eq!(body["remaining_items"], 0);
    assert_eq!(call(&app, Method::GET, "/visualizations", None).await, json!([]));
}

#[tokio::test]
async fn test_cleanup_on_empty_store() {
    let body = call(&app(), Method::POST, "/cleanup_visualizations?max_items=5", None).await;
    assert_eq!(body, json!({"status": "success", "remaining_items": 0}));
}
