//! Fingerprint deduplication through the full pipeline

use crate::common::{create_test_services, test_config, FlakyStore, TestTree};
use docsift::core::extract::ExtractorRegistry;
use docsift::core::indexer::{fingerprint_bytes, IndexingPipeline};
use docsift::core::storage::{fields, DocumentStore, StoreOptions, TantivyStore};
use docsift::core::types::DOC_TYPE;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_reindexing_unchanged_file_is_noop() {
    let (services, _storage) = create_test_services();
    let tree = TestTree::with_files(&[("notes.txt", "stable content")]);

    let first = services.index_path(tree.path(), "docs").unwrap();
    let second = services.index_path(tree.path(), "docs").unwrap();

    assert_eq!(first.files_indexed, 1);
    assert_eq!(second.files_indexed, 0);
    assert_eq!(second.duplicates_skipped, 1);

    let fingerprint = fingerprint_bytes(b"stable content");
    let count = services
        .store
        .count_term("docs", DOC_TYPE, fields::FILE_FINGERPRINT, &fingerprint)
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_fresh_process_sees_flushed_documents() {
    let storage = TempDir::new().unwrap();
    let tree = TestTree::with_files(&[("notes.txt", "stable content")]);

    {
        let services = docsift::Services::new(test_config(&storage)).unwrap();
        services.index_path(tree.path(), "docs").unwrap();
    }

    // New services, empty claim set: dedup comes from the store alone
    let services = docsift::Services::new(test_config(&storage)).unwrap();
    let stats = services.index_path(tree.path(), "docs").unwrap();

    assert_eq!(stats.files_indexed, 0);
    assert_eq!(stats.duplicates_skipped, 1);
}

#[test]
fn test_changed_file_creates_new_document() {
    let (services, _storage) = create_test_services();
    let tree = TestTree::with_files(&[("notes.txt", "version one")]);

    services.index_path(tree.path(), "docs").unwrap();
    tree.write("notes.txt", b"version two");
    let stats = services.index_path(tree.path(), "docs").unwrap();

    assert_eq!(stats.files_indexed, 1);

    // Old document is kept, new one added
    for content in [&b"version one"[..], &b"version two"[..]] {
        let count = services
            .store
            .count_term(
                "docs",
                DOC_TYPE,
                fields::FILE_FINGERPRINT,
                &fingerprint_bytes(content),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
    assert_eq!(services.store.get_metadata("docs").unwrap().documents, 2);
}

#[test]
fn test_dedup_is_scoped_to_index() {
    let (services, _storage) = create_test_services();
    let tree = TestTree::with_files(&[("notes.txt", "shared")]);

    let docs = services.index_path(tree.path(), "docs").unwrap();
    let archive = services.index_path(tree.path(), "archive").unwrap();

    assert_eq!(docs.files_indexed, 1);
    assert_eq!(archive.files_indexed, 1);
}

#[test]
fn test_failed_lookup_reindexes_rather_than_drops() {
    let storage = TempDir::new().unwrap();
    let tree = TestTree::with_files(&[("notes.txt", "content")]);
    let config = test_config(&storage);

    let store = Arc::new(FlakyStore::new(TantivyStore::new(
        config.storage.index_dir.clone(),
        StoreOptions::from(&config),
    )));

    // Separate pipelines: no shared claim set between passes
    for _ in 0..2 {
        let pipeline =
            IndexingPipeline::new(store.clone(), ExtractorRegistry::default(), &[], 10).unwrap();
        let stats = pipeline.index_path(tree.path(), "docs").unwrap();
        assert_eq!(stats.files_indexed, 1);
        assert_eq!(stats.submission_failures, 0);
    }

    assert_eq!(store.failed_lookups.load(Ordering::SeqCst), 2);
    assert_eq!(store.inner.get_metadata("docs").unwrap().documents, 2);
}
