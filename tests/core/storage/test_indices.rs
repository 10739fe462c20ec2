//! Named index management and persistence

use docsift::core::error::DocsiftError;
use docsift::core::storage::{
    fields, DocumentStore, StoreOptions, StoreQuery, TantivyStore, SCHEMA_VERSION,
};
use docsift::core::types::{Document, DOC_TYPE};
use tempfile::TempDir;

fn options() -> StoreOptions {
    StoreOptions {
        writer_heap_bytes: 15_000_000,
        ..StoreOptions::default()
    }
}

fn document(title: &str, content: &str, fingerprint: &str) -> Document {
    Document {
        id: None,
        author: "/archive".to_string(),
        title: title.to_string(),
        path: format!("/archive/{title}"),
        content: content.to_string(),
        file_fingerprint: fingerprint.to_string(),
    }
}

#[test]
fn test_documents_survive_reopen() {
    let storage = TempDir::new().unwrap();

    let id = {
        let store = TantivyStore::new(storage.path().to_path_buf(), options());
        let id = store
            .create("docs", DOC_TYPE, &document("a.txt", "persistent words", "fp-a"))
            .unwrap();
        store.flush("docs").unwrap();
        id
    };

    let store = TantivyStore::new(storage.path().to_path_buf(), options());
    let hits = store
        .search(&StoreQuery {
            query: "persistent".to_string(),
            indices: vec!["docs".to_string()],
            doc_type: DOC_TYPE.to_string(),
            highlight_fields: Vec::new(),
            limit: 10,
        })
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document.id.as_deref(), Some(id.as_str()));
    assert_eq!(hits[0].document.file_fingerprint, "fp-a");

    let metadata = store.get_metadata("docs").unwrap();
    assert_eq!(metadata.documents, 1);
    assert_eq!(metadata.schema_version, SCHEMA_VERSION);
}

#[test]
fn test_search_never_sees_other_doc_types() {
    let storage = TempDir::new().unwrap();
    let store = TantivyStore::new(storage.path().to_path_buf(), options());

    store
        .create("docs", "emails", &document("m.txt", "quarterly report", "fp-m"))
        .unwrap();
    store
        .create("docs", DOC_TYPE, &document("r.txt", "quarterly report", "fp-r"))
        .unwrap();
    store.flush("docs").unwrap();

    let hits = store
        .search(&StoreQuery {
            query: "quarterly".to_string(),
            indices: Vec::new(),
            doc_type: DOC_TYPE.to_string(),
            highlight_fields: Vec::new(),
            limit: 10,
        })
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document.title, "r.txt");
    assert_eq!(
        store
            .count_term("docs", DOC_TYPE, fields::FILE_FINGERPRINT, "fp-m")
            .unwrap(),
        0
    );
}

#[test]
fn test_invalid_names_are_rejected() {
    let storage = TempDir::new().unwrap();
    let store = TantivyStore::new(storage.path().to_path_buf(), options());

    let result = store.create("../outside", DOC_TYPE, &document("a.txt", "x", "fp"));
    assert!(matches!(result, Err(DocsiftError::InvalidIndexName(_))));
    assert!(!storage.path().join("../outside").exists());
}

#[test]
fn test_list_metadata_after_indexing() {
    let storage = TempDir::new().unwrap();
    let store = TantivyStore::new(storage.path().to_path_buf(), options());

    for name in ["beta", "alpha"] {
        store
            .create(name, DOC_TYPE, &document("a.txt", "words", "fp"))
            .unwrap();
        store.flush(name).unwrap();
    }

    let metadata = store.list_metadata().unwrap();
    let names: Vec<_> = metadata.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "beta"]);
    assert!(metadata.iter().all(|m| m.documents == 1));
}
