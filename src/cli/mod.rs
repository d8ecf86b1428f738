// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::api::{TfidfResponse, VisualizationResponse, VisualizationResult};
use crate::embeddings::EmbeddingTable;
use crate::reduction::{
    ReductionMethod, ReductionParams, TsneConfig, DEFAULT_N_COMPONENTS, DEFAULT_PERPLEXITY,
};
use crate::tfidf::TfidfVectorizer;
use crate::visualization::{VisualizationService, VisualizeOutcome};

const DEMO_EMBED_WORDS: &[&str] = &["cat", "dog", "quantum", "unicorn"];
const DEMO_DOCUMENTS: &[&str] = &[
    "This is the first document.",
    "This document is the second document.",
    "And this is the third one.",
    "Is this the first document?",
];
const DEMO_VISUALIZE_WORDS: &[&str] = &[
    "king",
    "queen",
    "man",
    "woman",
    "child",
    "dog",
    "cat",
    "computer",
    "technology",
];

/// Runs the embedding, TF-IDF and visualization pipelines without a server
#[derive(Parser, Debug)]
#[command(name = "viz-cli")]
#[command(version)]
#[command(about = "Local runner for the Fabstir embedding visualization pipelines", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up word vectors
    Embed(EmbedArgs),

    /// Compute TF-IDF vectors for documents
    Tfidf(TfidfArgs),

    /// Reduce word vectors to 2D/3D
    Visualize(VisualizeArgs),

    /// Run all three pipelines on built-in sample input
    Demo(TableArgs),
}

/// Embedding table location
#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// GloVe-format embedding file
    #[arg(long, env = "GLOVE_PATH", default_value = "glove.6B.100d.txt")]
    pub embeddings_path: PathBuf,

    /// Expected vector dimensionality
    #[arg(long, env = "EMBEDDING_DIM")]
    pub embedding_dim: Option<usize>,
}

impl TableArgs {
    fn load(&self) -> Result<EmbeddingTable> {
        EmbeddingTable::load(&self.embeddings_path, self.embedding_dim).with_context(|| {
            format!(
                "failed to load embeddings from {}",
                self.embeddings_path.display()
            )
        })
    }
}

#[derive(Args, Debug)]
pub struct EmbedArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Words to look up
    #[arg(required = true)]
    pub words: Vec<String>,
}

#[derive(Args, Debug)]
pub struct TfidfArgs {
    /// Documents, one per argument
    #[arg(required = true)]
    pub documents: Vec<String>,
}

#[derive(Args, Debug)]
pub struct VisualizeArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Reduction method (tsne or pca)
    #[arg(long, default_value = "tsne")]
    pub method: String,

    /// t-SNE perplexity
    #[arg(long, default_value_t = DEFAULT_PERPLEXITY)]
    pub perplexity: u32,

    /// Output dimensionality
    #[arg(long, default_value_t = DEFAULT_N_COMPONENTS)]
    pub n_components: usize,

    /// Seed for t-SNE initialisation
    #[arg(long, env = "TSNE_RANDOM_STATE", default_value_t = 42)]
    pub random_state: u64,

    /// Words to place
    #[arg(required = true)]
    pub words: Vec<String>,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Embed(args) => {
            let table = args.table.load()?;
            print_json(&table.lookup(&args.words))
        }
        Commands::Tfidf(args) => print_json(&run_tfidf(args.documents.as_slice())?),
        Commands::Visualize(args) => {
            let table = Arc::new(args.table.load()?);
            let tsne = TsneConfig {
                random_state: args.random_state,
                ..TsneConfig::default()
            };
            let params = ReductionParams::new(
                ReductionMethod::parse_or_default(&args.method),
                args.n_components,
                args.perplexity,
            );
            let result = run_visualize(table, tsne, args.words, params).await?;
            print_json(&result)
        }
        Commands::Demo(args) => run_demo(&args).await,
    }
}

fn run_tfidf<S: AsRef<str>>(documents: &[S]) -> Result<TfidfResponse> {
    let matrix = TfidfVectorizer::new().fit_transform(documents)?;
    Ok(matrix.into())
}

async fn run_visualize(
    table: Arc<EmbeddingTable>,
    tsne: TsneConfig,
    words: Vec<String>,
    params: ReductionParams,
) -> Result<VisualizationResult> {
    let service = VisualizationService::new(table, tsne);
    let outcome = service.visualize(words, params).await?;
    Ok(match outcome {
        VisualizeOutcome::Created(visualization) => {
            VisualizationResult::Found(VisualizationResponse::from(visualization))
        }
        VisualizeOutcome::NoValidWords => VisualizationResult::no_valid_words(),
    })
}

async fn run_demo(args: &TableArgs) -> Result<()> {
    let table = Arc::new(args.load()?);
    info!("Running demo against {} words", table.len());

    println!("\n--- GloVe Embeddings ---");
    let words = to_strings(DEMO_EMBED_WORDS);
    for (word, vector) in table.lookup(&words) {
        let head: Vec<f32> = vector.iter().take(5).copied().collect();
        println!("{}: {:?}...", word, head);
    }

    println!("\n--- TF-IDF ---");
    let tfidf = run_tfidf(DEMO_DOCUMENTS)?;
    println!("Features: {:?}", tfidf.feature_names);
    for (i, row) in tfidf.tfidf_vectors.iter().enumerate() {
        let head: Vec<f64> = row.iter().take(5).copied().collect();
        println!("Doc {}: {:?}...", i + 1, head);
    }

    println!("\n--- Visualization ---");
    let params = ReductionParams::new(
        ReductionMethod::Tsne,
        DEFAULT_N_COMPONENTS,
        DEFAULT_PERPLEXITY,
    );
    match run_visualize(
        table,
        TsneConfig::default(),
        to_strings(DEMO_VISUALIZE_WORDS),
        params,
    )
    .await?
    {
        VisualizationResult::Found(viz) => {
            println!("Visualization ID: {}", viz.visualization_id);
            let first: Vec<_> = viz.coordinates.iter().take(2).collect();
            println!("First few coordinates: {:?}", first);
            println!("Word colors: {:?}", viz.colors);
        }
        VisualizationResult::Error(e) => println!("❌ {}", e.error),
    }

    Ok(())
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
