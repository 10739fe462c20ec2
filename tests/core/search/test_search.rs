//! Search gateway against real indices

use crate::common::{create_test_services, test_config, TestTree};
use docsift::core::error::DocsiftError;
use docsift::core::services::Services;
use std::collections::HashSet;
use tempfile::TempDir;

fn indexed_services() -> (Services, TempDir, TestTree, TestTree) {
    let (services, storage) = create_test_services();
    let docs = TestTree::with_files(&[
        ("errors.txt", "a fatal error occurred in the parser"),
        ("clean.txt", "everything went fine"),
    ]);
    let other = TestTree::with_files(&[("incident.java", "class Incident { String error; }")]);

    services.index_path(docs.path(), "docs").unwrap();
    services.index_path(other.path(), "other").unwrap();
    (services, storage, docs, other)
}

fn identities(services: &Services, index: Option<&str>) -> HashSet<(String, String)> {
    services
        .search("error", index, false, None)
        .unwrap()
        .hits
        .into_iter()
        .map(|hit| (hit.index, hit.document.id.unwrap_or_default()))
        .collect()
}

#[test]
fn test_highlight_toggling() {
    let (services, _storage, _docs, _other) = indexed_services();

    let plain = services.search("error", Some("docs"), false, None).unwrap();
    let highlighted = services.search("error", Some("docs"), true, None).unwrap();

    assert_eq!(plain.count, 1);
    assert!(plain.hits.iter().all(|hit| hit.highlight.is_none()));

    let plain_ids: Vec<_> = plain.hits.iter().map(|h| h.document.id.clone()).collect();
    let highlighted_ids: Vec<_> = highlighted
        .hits
        .iter()
        .map(|h| h.document.id.clone())
        .collect();
    assert_eq!(plain_ids, highlighted_ids);

    let highlight = highlighted.hits[0].highlight.as_ref().unwrap();
    let content = &highlight["content"];
    assert!(!content.is_empty());
    assert!(content[0].contains("<em>error</em>"));
    // Only matching fields carry fragments
    assert!(highlight.keys().all(|k| ["path", "title", "content"].contains(&k.as_str())));
}

#[test]
fn test_all_indices_is_superset_of_one() {
    let (services, _storage, _docs, _other) = indexed_services();

    let scoped = identities(&services, Some("docs"));
    let everywhere = identities(&services, Some(""));
    let absent = identities(&services, None);

    assert_eq!(scoped.len(), 1);
    assert_eq!(everywhere.len(), 2);
    assert!(everywhere.is_superset(&scoped));
    assert_eq!(everywhere, absent);
}

#[test]
fn test_field_query_syntax_is_passed_through() {
    let (services, _storage, _docs, _other) = indexed_services();

    let response = services
        .search("title:clean AND content:fine", None, false, None)
        .unwrap();

    assert_eq!(response.count, 1);
    assert_eq!(response.hits[0].document.title, "clean.txt");
}

#[test]
fn test_query_errors_are_not_empty_results() {
    let (services, _storage, _docs, _other) = indexed_services();

    let result = services.search("nosuchfield:error", Some("docs"), false, None);
    assert!(matches!(result, Err(DocsiftError::InvalidQuery(_))));
}

#[test]
fn test_missing_index_is_an_error() {
    let (services, _storage, _docs, _other) = indexed_services();

    let result = services.search("error", Some("missing"), false, None);
    assert!(matches!(result, Err(DocsiftError::IndexNotFound(_))));
}

#[test]
fn test_no_indices_yields_no_hits() {
    let (services, _storage) = create_test_services();

    let response = services.search("error", None, false, None).unwrap();
    assert_eq!(response.count, 0);
}

#[test]
fn test_no_match_is_empty_not_error() {
    let (services, _storage, _docs, _other) = indexed_services();

    let response = services.search("zebra", Some("docs"), false, None).unwrap();
    assert_eq!(response.count, 0);
    assert!(response.hits.is_empty());
}

#[test]
fn test_limit_applies_across_indices() {
    let (services, _storage, _docs, _other) = indexed_services();

    let response = services.search("error", None, false, Some(1)).unwrap();
    assert_eq!(response.count, 1);
}

#[test]
fn test_search_while_another_instance_is_indexing() {
    let (indexer, storage) = create_test_services();
    let first = TestTree::with_files(&[("a.txt", "an error in batch one")]);
    indexer.index_path(first.path(), "docs").unwrap();

    // The indexing instance keeps its writer open on "docs"
    let searcher = Services::new(test_config(&storage)).unwrap();
    let response = searcher.search("error", Some("docs"), true, None).unwrap();
    assert_eq!(response.count, 1);

    // Dedup lookups from the second instance work too
    let stats = searcher.index_path(first.path(), "docs");
    assert_eq!(stats.unwrap().duplicates_skipped, 1);

    let second = TestTree::with_files(&[("b.txt", "another error in batch two")]);
    indexer.index_path(second.path(), "docs").unwrap();

    let response = searcher.search("error", None, false, None).unwrap();
    assert_eq!(response.count, 2);
}
