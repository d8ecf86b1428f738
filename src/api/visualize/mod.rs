// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Visualization API
//!
//! - POST /visualize: reduce word vectors to 2D/3D and store the result
//! - GET /visualizations/{id}: fetch a stored result
//! - GET /visualizations: list stored ids
//! - POST /cleanup_visualizations?max_items=N: evict the oldest results

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{
    cleanup_visualizations_handler, get_visualization_handler, list_visualizations_handler,
    visualize_handler,
};
pub use request::{CleanupParams, VisualizeRequest};
pub use response::{
    CleanupResponse, SoftError, VisualizationResponse, VisualizationResult, NOT_FOUND_MESSAGE,
    NO_VALID_WORDS_MESSAGE,
};
