//! Standardize command - process columns and write the augmented table.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use colored::Colorize;

use burnish::{ColumnProcessor, FilePatternStore, Parser, ProcessingMode, output};

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    columns: Vec<String>,
    reference_column: Option<String>,
    threshold: u8,
    output_path: Option<PathBuf>,
    patterns: Option<PathBuf>,
    changes_path: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let request = super::build_request(columns, reference_column, threshold);
    let mode_label = match request.mode {
        ProcessingMode::SelfLearning => "self-learning",
        ProcessingMode::Reference => "reference",
    };

    println!(
        "{} {} ({} mode, threshold {})",
        "Standardizing".cyan().bold(),
        file.display().to_string().white(),
        mode_label,
        threshold
    );

    let (table, metadata) = Parser::new().parse_file(&file)?;
    if verbose {
        println!(
            "Parsed {} rows x {} columns ({})",
            metadata.row_count, metadata.column_count, metadata.format
        );
    }

    let store_path = super::resolve_store_path(patterns, &file);
    let mut store = FilePatternStore::open(&store_path)?;

    let outcome = ColumnProcessor::new().process(&table, &request, &mut store)?;

    let output_path = output_path.unwrap_or_else(|| {
        let stem = file.file_stem().unwrap_or_default().to_string_lossy();
        let ext = file
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| "csv".to_string());
        file.with_file_name(format!("{}_std.{}", stem, ext))
    });
    output::write_file(&outcome.table, &output_path)?;

    if let Some(changes_path) = changes_path {
        let writer = BufWriter::new(File::create(&changes_path)?);
        serde_json::to_writer_pretty(writer, &outcome.changes)?;
        println!(
            "Change log written to {}",
            changes_path.display().to_string().cyan()
        );
    }

    println!(
        "{} {} values changed, output: {}",
        "Done:".green().bold(),
        outcome.changes.len().to_string().white().bold(),
        output_path.display().to_string().cyan()
    );

    if verbose {
        for change in outcome.changes.iter().take(10) {
            println!(
                "  row {:>5}  {}  '{}' → '{}'",
                change.row,
                change.column,
                change.original,
                change.canonical.green()
            );
        }
        if outcome.changes.len() > 10 {
            println!("  ... and {} more", outcome.changes.len() - 10);
        }
    }

    Ok(())
}
