// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! GloVe file loading tests against real files on disk

use fabstir_embedding_viz::embeddings::{EmbeddingLoadError, EmbeddingTable};
use std::io::Write;
use tempfile::NamedTempFile;

fn glove_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file.flush().unwrap();
    file
}

#[test]
fn test_load_from_disk() {
    let file = glove_file(
        "the 0.418 0.24968 -0.41242\n\
         cat 0.45281 -0.50108 -0.53714\n\
         dog 0.11008 -0.38781 -0.57615\n",
    );

    let table = EmbeddingTable::load(file.path(), None).unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(table.dimension(), 3);

    let cat = table.get("cat").unwrap();
    assert_eq!(cat.to_vec(), vec![0.45281, -0.50108, -0.53714]);
}

#[test]
fn test_expected_dimension_enforced() {
    let file = glove_file("cat 0.1 0.2 0.3\n");

    assert!(EmbeddingTable::load(file.path(), Some(3)).is_ok());

    let err = EmbeddingTable::load(file.path(), Some(100)).unwrap_err();
    match err {
        EmbeddingLoadError::DimensionMismatch {
            line,
            expected,
            actual,
            ..
        } => {
            assert_eq!(line, 1);
            assert_eq!(expected, 100);
            assert_eq!(actual, 3);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_ragged_file_rejected_with_line_number() {
    let file = glove_file("cat 0.1 0.2 0.3\ndog 0.4 0.5\n");
    let err = EmbeddingTable::load(file.path(), None).unwrap_err();
    assert_eq!(err.line(), Some(2));
}

#[test]
fn test_bad_float_rejected() {
    let file = glove_file("cat 0.1 0.2\ndog 0.4 abc\n");
    let err = EmbeddingTable::load(file.path(), None).unwrap_err();
    assert!(matches!(err, EmbeddingLoadError::InvalidFloat { line: 2, .. }));
    assert!(err.to_string().contains("abc"));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("glove.6B.100d.txt");

    let err = EmbeddingTable::load(&path, None).unwrap_err();
    assert!(matches!(err, EmbeddingLoadError::Io { .. }));
    assert!(err.to_string().contains("glove.6B.100d.txt"));
}

#[test]
fn test_empty_file_rejected() {
    let file = glove_file("\n\n");
    let err = EmbeddingTable::load(file.path(), None).unwrap_err();
    assert!(matches!(err, EmbeddingLoadError::Empty));
}

#[test]
fn test_case_folded_lookup_and_zero_fallback() {
    let file = glove_file("cat 1.0 2.0\n");
    let table = EmbeddingTable::load(file.path(), None).unwrap();

    let words: Vec<String> = vec!["CAT".into(), "Cat".into(), "unicorn".into()];
    let looked_up = table.lookup(&words);

    assert_eq!(looked_up["CAT"], vec![1.0, 2.0]);
    assert_eq!(looked_up["Cat"], vec![1.0, 2.0]);
    assert_eq!(looked_up["unicorn"], vec![0.0, 0.0]);
}

#[test]
fn test_select_keeps_request_order() {
    let file = glove_file("a1 1.0 0.0\nb2 0.0 1.0\nc3 1.0 1.0\n");
    let table = EmbeddingTable::load(file.path(), None).unwrap();

    let words: Vec<String> = vec!["c3".into(), "zz".into(), "a1".into()];
    let selected = table.select(&words);

    assert_eq!(selected.words, vec!["c3", "a1"]);
    assert_eq!(selected.matrix.row(0).to_vec(), vec![1.0, 1.0]);
    assert_eq!(selected.matrix.row(1).to_vec(), vec![1.0, 0.0]);
}
