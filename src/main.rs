// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::Parser;
use fabstir_embedding_viz::{
    api::{start_server, AppState},
    config::ServerConfig,
    embeddings::EmbeddingTable,
    version,
};
use std::{env, sync::Arc, time::Instant};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();

    let config = ServerConfig::parse();

    println!("🚀 Starting Fabstir Embedding Viz...\n");
    println!("📦 BUILD VERSION: {}", version::VERSION);
    println!("📅 Build Date: {}", version::BUILD_DATE);
    println!();
    tracing::info!("{}", version::get_version_string());

    // The table is required; a missing or malformed file is fatal
    println!(
        "🧠 Loading embeddings from {}...",
        config.embeddings_path.display()
    );
    let started = Instant::now();
    let table = EmbeddingTable::load(&config.embeddings_path, config.embedding_dim)
        .with_context(|| {
            format!(
                "failed to load embeddings from {}",
                config.embeddings_path.display()
            )
        })?;
    println!(
        "✅ Loaded {} words ({} dimensions) in {:.1?}",
        table.len(),
        table.dimension(),
        started.elapsed()
    );

    let state = AppState::new(Arc::new(table), config.tsne_config());

    let separator = "=".repeat(60);
    println!("\n{}", separator);
    println!("API endpoints on http://{}:", config.bind_address());
    println!("  Health:        GET  /health");
    println!("  Embeddings:    POST /embeddings");
    println!("  TF-IDF:        POST /tfidf");
    println!("  Visualize:     POST /visualize");
    println!("  Stored:        GET  /visualizations[/{{id}}]");
    println!("  Cleanup:       POST /cleanup_visualizations?max_items=20");
    println!("\nTest with curl:");
    println!("  curl -X POST http://{}/visualize \\", config.bind_address());
    println!("    -H 'Content-Type: application/json' \\");
    println!("    -d '{{\"words\": [\"king\", \"queen\", \"man\", \"woman\"], \"method\": \"pca\"}}'");
    println!("\nPress Ctrl+C to shutdown...");
    println!("{}\n", separator);

    start_server(&config, state).await?;

    println!("👋 Goodbye!");
    Ok(())
}
