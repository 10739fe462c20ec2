//! List command - show every index with its document count

use crate::cli::output::{colors, format_relative_time};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for list-indices
#[derive(Args, Debug)]
pub struct ListArgs {}

/// Index list item
#[derive(Debug, Serialize)]
pub struct IndexListItem {
    pub name: String,
    pub documents: u64,
    pub created_at: String,
    pub indexed_at: String,
}

/// Index list response
#[derive(Debug, Serialize)]
pub struct IndexListResponse {
    pub count: usize,
    pub indices: Vec<IndexListItem>,
}

/// Execute list-indices command
pub async fn execute(
    _args: ListArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let indices = services.store.list_metadata()?;

    match format {
        OutputFormat::Human => {
            if indices.is_empty() {
                println!(
                    "No indices found. Run '{}' to create one.",
                    colors::label("docsift index <path> --index <name>")
                );
                return Ok(());
            }

            println!(
                "{} ({}) in {}:",
                colors::label("Indices"),
                colors::number(&indices.len().to_string()),
                colors::file_path(&services.store.root().display().to_string())
            );
            for meta in &indices {
                println!(
                    "  {:<24} {:>8} docs  {}",
                    colors::index_name(&meta.name),
                    colors::number(&meta.documents.to_string()),
                    colors::dim(&format_relative_time(&meta.last_indexed_at))
                );
            }
        }
        OutputFormat::Json => {
            let response = IndexListResponse {
                count: indices.len(),
                indices: indices
                    .iter()
                    .map(|meta| IndexListItem {
                        name: meta.name.clone(),
                        documents: meta.documents,
                        created_at: meta.created_at.to_rfc3339(),
                        indexed_at: meta.last_indexed_at.to_rfc3339(),
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
