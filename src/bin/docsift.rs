//! docsift CLI - crawl, index and search documents
//!
//! # Examples
//!
//! ```bash
//! # Index a directory tree
//! docsift index /path/to/docs --index docs
//!
//! # Search one index with highlighting
//! docsift search "error" --index docs --highlight
//!
//! # Search every index
//! docsift search "title:report AND budget"
//!
//! # List indices
//! docsift list-indices
//! ```

use clap::Parser;
use docsift::cli::{init_logging, run, Cli};
use docsift::DocsiftError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(e) = run(cli).await {
        docsift::cli::output::print_error(&e.to_string());
        // Usage errors (bad index name, bad query) exit 2
        let code = match e.downcast_ref::<DocsiftError>() {
            Some(err) if err.is_bad_request() => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}
