//! Error types for the Burnish library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Burnish operations.
#[derive(Debug, Error)]
pub enum BurnishError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Empty file or no data to process.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Invalid processing request (missing reference column, empty
    /// target selection, out-of-range threshold). Raised before any
    /// persistence or output write.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Pattern store read/write failure.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Burnish operations.
pub type Result<T> = std::result::Result<T, BurnishError>;
