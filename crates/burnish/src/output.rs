//! Writing augmented tables back out as delimited text.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{BurnishError, Result};
use crate::input::DataTable;

/// Write a table to any writer using the table's own delimiter.
///
/// `Empty` cells become empty fields; `Numeric` cells use their
/// shortest round-trip form.
pub fn write_to<W: Write>(table: &DataTable, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(table.delimiter)
        .from_writer(writer);

    csv_writer.write_record(&table.headers)?;
    for row in &table.rows {
        csv_writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    csv_writer.flush().map_err(|e| BurnishError::Io {
        path: Default::default(),
        source: e,
    })?;

    Ok(())
}

/// Write a table to a file.
pub fn write_file(table: &DataTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| BurnishError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_to(table, file)
}

/// Render a table as a string (mostly for tests and previews).
pub fn to_string(table: &DataTable) -> Result<String> {
    let mut buffer = Vec::new();
    write_to(table, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| BurnishError::EmptyData(format!("Non-UTF8 output: {}", e)))
}
