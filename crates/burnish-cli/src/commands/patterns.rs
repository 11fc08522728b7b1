//! Patterns command - list stored canonical mappings for a column.

use std::path::PathBuf;

use colored::Colorize;

use burnish::{FilePatternStore, PatternStore};

pub fn run(
    column: String,
    patterns: Option<PathBuf>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store_path = patterns.unwrap_or_else(|| PathBuf::from(".burnish/patterns.json"));
    if !store_path.exists() {
        return Err(format!(
            "Pattern store not found: {}\nRun 'burnish standardize' in self-learning mode first.",
            store_path.display()
        )
        .into());
    }

    let store = FilePatternStore::open(&store_path)?;
    let entries = store.load(&column)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!(
            "No patterns stored for column '{}' in {}",
            column.white().bold(),
            store_path.display()
        );
        return Ok(());
    }

    println!(
        "{} patterns for column '{}'",
        entries.len().to_string().white().bold(),
        column.white().bold()
    );
    for (key, canonical) in &entries {
        println!("  {:<32} → {}", key, canonical.green());
    }

    Ok(())
}
