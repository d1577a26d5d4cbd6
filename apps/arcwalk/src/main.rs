//! # arcwalk
//!
//! Runs one graph algorithm over a graph description and prints the result.
//!
//! ## Usage
//!
//! ```bash
//! # Breadth-first order from A
//! arcwalk --graph deps.toml traverse --kind bfs --root A
//!
//! # Topological order, as JSON
//! arcwalk --graph deps.toml --json-mode toposort --method dfs
//!
//! # Acyclicity with a search configuration
//! arcwalk --graph deps.toml --config search.toml check
//! ```

use arcwalk::cli;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Initialize tracing. ARCWALK_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("ARCWALK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "arcwalk=info,arcwalk_core=warn".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // The banner would corrupt JSON output
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(&cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the arcwalk startup banner.
fn print_banner() {
    println!("arcwalk v{}\n", env!("CARGO_PKG_VERSION"));
}
