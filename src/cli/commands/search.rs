//! Search command - search indexed documents

use crate::cli::output::{colors, render_fragment};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::{Highlights, SearchRequest};
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Query in query-string syntax (e.g. `error`, `title:report AND budget`)
    pub keyword: String,

    /// Index to search (all indices when omitted)
    #[arg(long, short = 'i')]
    pub index: Option<String>,

    /// Highlight matches in path, title and content
    #[arg(long)]
    pub highlight: bool,

    /// Maximum number of results
    #[arg(short = 'k', long = "limit")]
    pub k: Option<usize>,
}

/// Search result item
#[derive(Debug, Serialize)]
pub struct SearchResultItem {
    pub rank: usize,
    pub index: String,
    pub score: f32,
    pub id: Option<String>,
    pub title: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlights>,
}

/// Search response
#[derive(Debug, Serialize)]
pub struct SearchResponseOutput {
    pub query: String,
    pub index: Option<String>,
    pub total_results: usize,
    pub duration_ms: u64,
    pub results: Vec<SearchResultItem>,
}

/// Execute the search command
pub async fn execute(
    args: SearchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = SearchRequest {
        keyword: args.keyword.clone(),
        index: args.index.clone(),
        highlight: args.highlight,
        k: args.k,
    };

    let response = services.search.search(request)?;

    let output = SearchResponseOutput {
        query: response.query,
        index: args.index.clone(),
        total_results: response.count,
        duration_ms: response.duration_ms,
        results: response
            .hits
            .into_iter()
            .enumerate()
            .map(|(i, hit)| SearchResultItem {
                rank: i + 1,
                index: hit.index,
                score: hit.score,
                id: hit.document.id,
                title: hit.document.title,
                path: hit.document.path,
                highlight: hit.highlight,
            })
            .collect(),
    };

    match format {
        OutputFormat::Human => print_human(&output),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn print_human(output: &SearchResponseOutput) {
    let scope = output.index.as_deref().unwrap_or("all indices");

    if output.results.is_empty() {
        println!(
            "No results found for '{}' in {}",
            colors::label(&output.query),
            colors::index_name(scope)
        );
        return;
    }

    println!(
        "Found {} result(s) in {}:\n",
        colors::number(&output.total_results.to_string()),
        colors::index_name(scope)
    );

    for result in &output.results {
        println!(
            "[{}] {} {} {}",
            colors::rank(&result.rank.to_string()),
            colors::file_path(&result.path),
            colors::dim(&format!("({})", result.index)),
            colors::score(&format!("{:.2}", result.score))
        );
        if let Some(highlight) = &result.highlight {
            for (field, fragments) in highlight {
                for fragment in fragments {
                    println!("    {}: {}", colors::dim(field), render_fragment(fragment));
                }
            }
        }
        println!();
    }
}
