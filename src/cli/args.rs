//! Command line argument parsing for the catalog-suggest CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// catalog-suggest - personalized autocomplete for catalog queries
#[derive(Parser, Debug, Clone)]
#[command(name = "catalog-suggest")]
#[command(about = "Personalized autocomplete over Brand-Category-Line catalog codes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SuggestArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Directory holding the catalog reference files
    #[arg(short, long, default_value = "data", env = "CATALOG_SUGGEST_DATA")]
    pub data_dir: PathBuf,

    /// Engine configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SuggestArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Suggest codes for a partial query
    Suggest(SuggestQueryArgs),

    /// Map past queries to their canonical codes
    Canonicalize(CanonicalizeArgs),

    /// Show how a query is split into keywords
    Analyze(AnalyzeArgs),

    /// Serve a file of JSON-lines requests
    Batch(BatchArgs),

    /// Show reference table statistics
    Stats,

    /// Interactive session with a local search history
    Repl(ReplArgs),
}

/// Arguments for a single suggestion
#[derive(Parser, Debug, Clone)]
pub struct SuggestQueryArgs {
    /// Partial query being typed
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Past query, most recent first (repeatable)
    #[arg(short = 'H', long = "history", value_name = "PAST_QUERY")]
    pub history: Vec<String>,

    /// Include the score of each suggestion
    #[arg(long)]
    pub scores: bool,
}

/// Arguments for canonicalization
#[derive(Parser, Debug, Clone)]
pub struct CanonicalizeArgs {
    /// Past queries to canonicalize
    #[arg(value_name = "QUERY", required = true)]
    pub queries: Vec<String>,
}

/// Arguments for query analysis
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Query to analyze
    #[arg(value_name = "QUERY")]
    pub query: String,
}

/// Arguments for batch serving
#[derive(Parser, Debug, Clone)]
pub struct BatchArgs {
    /// JSON-lines file, one `{"query": ..., "history": [...]}` object per line
    #[arg(value_name = "REQUEST_FILE")]
    pub request_file: PathBuf,
}

/// Arguments for the interactive session
#[derive(Parser, Debug, Clone)]
pub struct ReplArgs {
    /// Number of submitted queries kept in the session history
    #[arg(long, default_value = "10")]
    pub history_size: usize,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
