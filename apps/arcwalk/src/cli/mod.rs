//! # arcwalk CLI Module
//!
//! This module implements the command-line driver over the arcwalk solvers.
//!
//! ## Available Commands
//!
//! - `traverse` - Run BFS, DFS or a configured frontier search
//! - `reach` - Single pair reachability
//! - `closure` - Transitive closure, or one path out of it
//! - `toposort` - Topological order by in-degree or DFS
//! - `check` - Acyclicity, cross-checked by both topological solvers

mod commands;
mod document;

use arcwalk_core::ArcwalkError;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub use commands::*;
pub use document::{GraphDocument, NamedGraph, load_graph};

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// arcwalk - graph algorithms over a described graph
///
/// Loads a graph description, runs one algorithm on it and prints the result.
#[derive(Parser, Debug)]
#[command(name = "arcwalk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the graph description (TOML, or JSON by extension)
    #[arg(short = 'g', long, global = true, default_value = "graph.toml")]
    pub graph: PathBuf,

    /// Path to a TOML search configuration
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Traverse the graph and print the visit order
    Traverse {
        /// Traversal engine
        #[arg(short, long, value_enum, default_value_t = TraversalKind::Bfs)]
        kind: TraversalKind,

        /// Start vertex; every component is searched when omitted
        #[arg(short, long)]
        root: Option<String>,
    },

    /// Decide whether one vertex reaches another
    Reach {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,
    },

    /// Compute the transitive closure
    Closure {
        /// Print a path from this vertex (requires --to)
        #[arg(long, requires = "to")]
        from: Option<String>,

        /// Path target (requires --from)
        #[arg(long, requires = "from")]
        to: Option<String>,
    },

    /// Order the vertices topologically
    Toposort {
        #[arg(short, long, value_enum, default_value_t = TopologicalMethod::Degree)]
        method: TopologicalMethod,
    },

    /// Check acyclicity
    Check,
}

/// Traversal engines selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TraversalKind {
    /// Breadth-first search
    Bfs,
    /// Depth-first search with arc classification
    Dfs,
    /// Frontier search using the configured buffer
    Frontier,
}

/// Topological solvers selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TopologicalMethod {
    /// Kahn-Knuth in-degree elimination
    Degree,
    /// Depth-first completion order
    Dfs,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Run the selected command and return its report.
pub fn run(cli: &Cli) -> Result<serde_json::Value, ArcwalkError> {
    let graph = load_graph(&cli.graph)?;
    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Traverse { kind, root } => {
            cmd_traverse(&graph, &config, *kind, root.as_deref(), cli.verbose)
        }
        Commands::Reach { from, to } => cmd_reach(&graph, &config, from, to),
        Commands::Closure { from, to } => match (from, to) {
            (Some(from), Some(to)) => cmd_path(&graph, &config, from, to),
            _ => cmd_closure(&graph, &config),
        },
        Commands::Toposort { method } => cmd_toposort(&graph, &config, *method),
        Commands::Check => cmd_check(&graph, &config),
    }
}

/// Execute the CLI with parsed arguments, printing the report.
pub fn execute(cli: &Cli) -> Result<(), ArcwalkError> {
    let report = run(cli)?;

    if cli.json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_default()
        );
    } else {
        print!("{}", render_text(&report));
    }
    Ok(())
}
