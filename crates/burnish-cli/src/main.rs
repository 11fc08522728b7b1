//! Burnish CLI - fuzzy standardization for tabular columns.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Standardize {
            file,
            columns,
            reference_column,
            threshold,
            output,
            patterns,
            changes,
        } => commands::standardize::run(
            file,
            columns,
            reference_column,
            threshold,
            output,
            patterns,
            changes,
            cli.verbose,
        ),

        Commands::Preview {
            file,
            columns,
            reference_column,
            threshold,
            patterns,
        } => commands::preview::run(
            file,
            columns,
            reference_column,
            threshold,
            patterns,
            cli.verbose,
        ),

        Commands::Patterns {
            column,
            patterns,
            json,
        } => commands::patterns::run(column, patterns, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
