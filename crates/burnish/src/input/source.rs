//! Cell values, parsed tables, and source metadata.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single cell of a parsed table.
///
/// Only `Text` participates in matching; `Numeric` and `Empty` cells
/// pass through the engine unchanged and never appear in a change log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Numeric(f64),
    Empty,
}

impl CellValue {
    /// Classify a raw field from a delimited file.
    ///
    /// Null-like markers (empty, NA, N/A, null, none, nil, `.`, `-`)
    /// become `Empty`; anything that parses as a number becomes
    /// `Numeric`; the rest is kept verbatim as `Text`.
    pub fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        if Self::is_null_marker(trimmed) {
            return CellValue::Empty;
        }
        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return CellValue::Numeric(n);
            }
        }
        CellValue::Text(raw.to_string())
    }

    /// Check if a trimmed string represents a missing value.
    pub fn is_null_marker(trimmed: &str) -> bool {
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("n/a")
            || trimmed.eq_ignore_ascii_case("null")
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed.eq_ignore_ascii_case("nil")
            || trimmed == "."
            || trimmed == "-"
    }

    /// The text content, if this is a `Text` cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// True for `Text` cells whose content is not pure whitespace.
    pub fn is_matchable(&self) -> bool {
        matches!(self, CellValue::Text(s) if !s.trim().is_empty())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Numeric(n) => write!(f, "{}", n),
            CellValue::Empty => Ok(()),
        }
    }
}

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was parsed.
    pub parsed_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a parsed file.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            parsed_at: Utc::now(),
        }
    }
}

/// Parsed tabular data with typed cells.
#[derive(Debug, Clone)]
pub struct DataTable {
    /// Column headers, in order.
    pub headers: Vec<String>,
    /// Cell data in row-major order.
    pub rows: Vec<Vec<CellValue>>,
    /// The delimiter used by the source.
    pub delimiter: u8,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>, delimiter: u8) -> Self {
        Self {
            headers,
            rows,
            delimiter,
        }
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Iterate over all values of one column.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &CellValue> {
        self.rows
            .iter()
            .map(move |row| row.get(index).unwrap_or(&CellValue::Empty))
    }

    /// Get a specific cell.
    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Set a specific cell. Out-of-range indices are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: CellValue) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = value;
        }
    }

    /// Insert a column at `index`, shifting later columns right.
    ///
    /// `values` shorter than the row count is padded with `Empty`.
    pub fn insert_column(&mut self, index: usize, name: String, mut values: Vec<CellValue>) {
        let index = index.min(self.headers.len());
        values.resize(self.rows.len(), CellValue::Empty);
        self.headers.insert(index, name);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.insert(index, value);
        }
    }

    /// Replace the contents of an existing column.
    pub fn replace_column(&mut self, index: usize, mut values: Vec<CellValue>) {
        values.resize(self.rows.len(), CellValue::Empty);
        for (row, value) in self.rows.iter_mut().zip(values) {
            if let Some(cell) = row.get_mut(index) {
                *cell = value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_null_markers() {
        assert_eq!(CellValue::classify(""), CellValue::Empty);
        assert_eq!(CellValue::classify("  "), CellValue::Empty);
        assert_eq!(CellValue::classify("NA"), CellValue::Empty);
        assert_eq!(CellValue::classify("n/a"), CellValue::Empty);
        assert_eq!(CellValue::classify("NULL"), CellValue::Empty);
        assert_eq!(CellValue::classify("."), CellValue::Empty);
    }

    #[test]
    fn test_classify_numeric() {
        assert_eq!(CellValue::classify("42"), CellValue::Numeric(42.0));
        assert_eq!(CellValue::classify(" 3.5 "), CellValue::Numeric(3.5));
        assert_eq!(CellValue::classify("-7"), CellValue::Numeric(-7.0));
    }

    #[test]
    fn test_classify_text() {
        assert_eq!(
            CellValue::classify("A100"),
            CellValue::Text("A100".to_string())
        );
        // Leading/trailing whitespace is preserved on text cells.
        assert_eq!(
            CellValue::classify(" part-1 "),
            CellValue::Text(" part-1 ".to_string())
        );
    }

    #[test]
    fn test_insert_column_shifts_right() {
        let mut table = DataTable::new(
            vec!["a".into(), "b".into()],
            vec![vec![
                CellValue::Text("x".into()),
                CellValue::Text("y".into()),
            ]],
            b',',
        );
        table.insert_column(1, "a_std".into(), vec![CellValue::Text("X".into())]);

        assert_eq!(table.headers, vec!["a", "a_std", "b"]);
        assert_eq!(table.get(0, 1), Some(&CellValue::Text("X".into())));
        assert_eq!(table.get(0, 2), Some(&CellValue::Text("y".into())));
    }
}
