//! Index command - recursively index a path into a named index

use crate::cli::output::{colors, format_duration};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::storage::validate_index_name;
use crate::core::types::IndexStats;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the index command
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// File or directory to index (a missing path indexes nothing)
    pub path: PathBuf,

    /// Name of the target index (created on first use)
    #[arg(long, short = 'i')]
    pub index: String,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Indexing result response
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub path: String,
    #[serde(flatten)]
    pub stats: IndexStats,
    pub duration_secs: f64,
}

/// Execute the index command
pub async fn execute(
    args: IndexArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    // Fail fast before walking anything
    validate_index_name(&args.index)?;

    if !args.quiet && format == OutputFormat::Human {
        eprintln!(
            "Indexing {} into '{}'...",
            colors::file_path(&args.path.display().to_string()),
            colors::index_name(&args.index)
        );
    }

    let worker = Arc::clone(services);
    let path = args.path.clone();
    let index = args.index.clone();
    let stats = tokio::task::spawn_blocking(move || worker.index_path(&path, &index)).await??;

    let response = IndexResponse {
        path: args.path.display().to_string(),
        duration_secs: stats.duration_ms as f64 / 1000.0,
        stats,
    };

    match format {
        OutputFormat::Human => print_human(&response),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

fn print_human(response: &IndexResponse) {
    let stats = &response.stats;
    println!(
        "{} {} of {} files into '{}' in {}",
        colors::success("Indexed"),
        colors::number(&stats.files_indexed.to_string()),
        colors::number(&stats.files_seen.to_string()),
        colors::index_name(&stats.index),
        colors::number(&format_duration(response.duration_secs))
    );
    println!(
        "  duplicates: {}  filtered: {}",
        colors::number(&stats.duplicates_skipped.to_string()),
        colors::number(&stats.files_filtered.to_string())
    );

    let failures =
        stats.extraction_failures + stats.submission_failures + stats.traversal_errors;
    if failures > 0 {
        println!(
            "  {} extraction: {}  submission: {}  traversal: {}",
            colors::warning("failures"),
            colors::number(&stats.extraction_failures.to_string()),
            colors::number(&stats.submission_failures.to_string()),
            colors::number(&stats.traversal_errors.to_string())
        );
    }
}
