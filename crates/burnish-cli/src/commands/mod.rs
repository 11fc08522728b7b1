//! CLI command implementations.

pub mod patterns;
pub mod preview;
pub mod standardize;

use std::path::{Path, PathBuf};

use burnish::pattern::patterns_path;
use burnish::{ProcessRequest, ProcessingMode};

/// Build a request from the shared command-line options.
pub(crate) fn build_request(
    columns: Vec<String>,
    reference_column: Option<String>,
    threshold: u8,
) -> ProcessRequest {
    ProcessRequest {
        mode: if reference_column.is_some() {
            ProcessingMode::Reference
        } else {
            ProcessingMode::SelfLearning
        },
        target_columns: columns,
        reference_column,
        threshold,
    }
}

/// Resolve the pattern store path: explicit flag, or the default
/// `.burnish/patterns.json` beside the data file.
pub(crate) fn resolve_store_path(explicit: Option<PathBuf>, data_file: &Path) -> PathBuf {
    explicit.unwrap_or_else(|| patterns_path(data_file))
}
