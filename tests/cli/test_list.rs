//! Tests for the list-indices CLI command

use crate::cli::test_helpers::{create_cli_test_services, create_test_repo, setup_indexed};
use docsift::cli::commands::list::{execute, ListArgs};
use docsift::cli::OutputFormat;

/// Test listing with no indices
#[tokio::test]
async fn test_list_empty() {
    let (services, _storage_temp) = create_cli_test_services();

    let result = execute(ListArgs {}, &services, OutputFormat::Human).await;
    assert!(result.is_ok());
}

/// Test listing several indices in both formats
#[tokio::test]
async fn test_list_populated() {
    let (services, _storage_temp) = create_cli_test_services();
    let repo = create_test_repo(&[("a.txt", "alpha"), ("b.txt", "beta")]);
    setup_indexed(&services, repo.path(), "first");
    setup_indexed(&services, repo.path(), "second");

    assert!(execute(ListArgs {}, &services, OutputFormat::Human).await.is_ok());
    assert!(execute(ListArgs {}, &services, OutputFormat::Json).await.is_ok());

    let names: Vec<_> = services
        .store
        .list_metadata()
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(names, vec!["first", "second"]);
}
