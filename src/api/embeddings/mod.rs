// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding lookup API
//!
//! POST /embeddings returns the static table vector for every requested word.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::embeddings_handler;
pub use request::EmbeddingsRequest;
pub use response::EmbeddingsResponse;
