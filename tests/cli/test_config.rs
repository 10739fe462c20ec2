//! Tests for the show-config CLI command

use crate::cli::test_helpers::create_cli_test_services;
use docsift::cli::commands::config::{execute, ConfigArgs};
use docsift::cli::OutputFormat;
use docsift::core::config::Config;

#[tokio::test]
async fn test_show_config_human() {
    let (services, _storage_temp) = create_cli_test_services();

    let result = execute(ConfigArgs {}, &services, OutputFormat::Human).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_show_config_json_round_trips() {
    let (services, _storage_temp) = create_cli_test_services();

    assert!(execute(ConfigArgs {}, &services, OutputFormat::Json).await.is_ok());

    let json = serde_json::to_string(&*services.config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.storage.index_dir, services.config.storage.index_dir);
    assert_eq!(parsed.indexing.writer_heap_mb, 15);
}
