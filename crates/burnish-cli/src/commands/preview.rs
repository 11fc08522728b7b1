//! Preview command - show match statistics without writing anything.

use std::path::PathBuf;

use colored::Colorize;

use burnish::{FilePatternStore, Parser, preview};

pub fn run(
    file: PathBuf,
    columns: Vec<String>,
    reference_column: Option<String>,
    threshold: u8,
    patterns: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let request = super::build_request(columns, reference_column, threshold);

    let (table, metadata) = Parser::new().parse_file(&file)?;
    if verbose {
        println!(
            "Parsed {} rows x {} columns ({})",
            metadata.row_count, metadata.column_count, metadata.format
        );
    }

    let store_path = super::resolve_store_path(patterns, &file);
    let store = FilePatternStore::open(&store_path)?;

    let results = preview(&table, &request, &store)?;

    println!(
        "{} {}",
        "Preview for".cyan().bold(),
        file.display().to_string().white()
    );
    for (column, stats) in &results {
        println!(
            "  {:<24} {} of {} values would change ({}%)",
            column.white().bold(),
            stats.changed.to_string().yellow(),
            stats.total,
            stats.percentage
        );
        for (original, canonical) in &stats.examples {
            println!("    '{}' → '{}'", original, canonical.green());
        }
    }

    Ok(())
}
