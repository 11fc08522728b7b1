//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Burnish: fuzzy standardization for tabular columns
#[derive(Parser)]
#[command(name = "burnish")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Standardize columns and write the augmented table
    Standardize {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Columns to standardize (comma-separated)
        #[arg(short, long, value_delimiter = ',', required = true)]
        columns: Vec<String>,

        /// Match against this reference column instead of self-learning
        #[arg(short, long)]
        reference_column: Option<String>,

        /// Fuzzy match threshold (0-100)
        #[arg(short, long, default_value = "80")]
        threshold: u8,

        /// Output path (default: <file>_std.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pattern store path (default: .burnish/patterns.json beside FILE)
        #[arg(short, long)]
        patterns: Option<PathBuf>,

        /// Also write the change log as JSON to this path
        #[arg(long)]
        changes: Option<PathBuf>,
    },

    /// Preview what standardization would change, without writing
    Preview {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Columns to standardize (comma-separated)
        #[arg(short, long, value_delimiter = ',', required = true)]
        columns: Vec<String>,

        /// Match against this reference column instead of self-learning
        #[arg(short, long)]
        reference_column: Option<String>,

        /// Fuzzy match threshold (0-100)
        #[arg(short, long, default_value = "80")]
        threshold: u8,

        /// Pattern store path (default: .burnish/patterns.json beside FILE)
        #[arg(short, long)]
        patterns: Option<PathBuf>,
    },

    /// List stored canonical mappings for a column identity
    Patterns {
        /// Column identity to list
        #[arg(value_name = "COLUMN")]
        column: String,

        /// Pattern store path (default: .burnish/patterns.json)
        #[arg(short, long)]
        patterns: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
