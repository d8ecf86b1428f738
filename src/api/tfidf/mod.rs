// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! TF-IDF API
//!
//! POST /tfidf fits a vectorizer on the posted documents and returns the
//! vocabulary plus one dense weight row per document.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::tfidf_handler;
pub use request::TfidfRequest;
pub use response::TfidfResponse;
