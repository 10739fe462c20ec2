//! Config command - show current configuration

use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::services::Services;
use clap::Args;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Execute the config command
pub async fn execute(
    _args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config: &Config = &services.config;

    match format {
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  indexing:");
            println!(
                "    max_file_size_mb: {}",
                config.indexing.max_file_size_mb
            );
            println!(
                "    commit_batch_size: {}",
                config.indexing.commit_batch_size
            );
            println!("    writer_heap_mb: {}", config.indexing.writer_heap_mb);
            println!(
                "    exclude_patterns: {:?}",
                config.indexing.exclude_patterns
            );
            println!("  storage:");
            println!("    index_dir: {}", config.storage.index_dir.display());
            println!("  search:");
            println!("    default_k: {}", config.search.default_k);
            println!("    max_k: {}", config.search.max_k);
            println!(
                "    max_query_length: {}",
                config.search.max_query_length
            );
            println!(
                "    snippet_max_chars: {}",
                config.search.snippet_max_chars
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
    }

    Ok(())
}
