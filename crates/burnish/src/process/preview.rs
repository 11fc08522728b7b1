//! Dry-run preview: per-column match statistics without mutating
//! anything, for a confirmation step before processing.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::DataTable;
use crate::matcher::FuzzyMatcher;
use crate::pattern::PatternStore;

use super::processor::{ProcessingMode, ProcessRequest, build_reference_matcher, learn_column};

/// How many example pairs a preview keeps per column.
const MAX_EXAMPLES: usize = 5;

/// Match statistics for one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewStats {
    /// Total rows in the column.
    pub total: usize,
    /// Rows whose value would be altered.
    pub changed: usize,
    /// `changed / total`, rounded to one decimal place.
    pub percentage: f64,
    /// Up to five `(original, canonical)` pairs.
    pub examples: Vec<(String, String)>,
}

/// Compute per-column preview statistics for a request.
///
/// Self-learning matchers are built the same way `process` builds
/// them, but nothing is committed to the store and no column is
/// inserted; the table and store are left untouched.
pub fn preview(
    table: &DataTable,
    request: &ProcessRequest,
    store: &dyn PatternStore,
) -> Result<IndexMap<String, PreviewStats>> {
    request.validate(table)?;

    let mut results = IndexMap::new();

    let shared = match request.mode {
        ProcessingMode::Reference => Some(build_reference_matcher(table, request)?),
        ProcessingMode::SelfLearning => None,
    };

    for column in request.effective_targets() {
        let Some(idx) = table.column_index(column) else {
            continue;
        };

        let stats = match &shared {
            Some(matcher) => preview_column(table, idx, matcher, request.threshold),
            None => {
                let Some(learner) = learn_column(table, column, store)? else {
                    continue;
                };
                let matcher = learner.into_matcher();
                preview_column(table, idx, &matcher, request.threshold)
            }
        };

        results.insert(column.to_string(), stats);
    }

    Ok(results)
}

fn preview_column(
    table: &DataTable,
    idx: usize,
    matcher: &FuzzyMatcher,
    threshold: u8,
) -> PreviewStats {
    let total = table.row_count();
    let mut changed = 0;
    let mut examples = Vec::new();

    for cell in table.column_values(idx) {
        let result = matcher.matches(cell, threshold);
        if result.changed {
            changed += 1;
            if examples.len() < MAX_EXAMPLES {
                examples.push((
                    cell.as_text().unwrap_or_default().to_string(),
                    result.value.to_string(),
                ));
            }
        }
    }

    let percentage = if total > 0 {
        (changed as f64 / total as f64 * 1000.0).round() / 10.0
    } else {
        0.0
    };

    PreviewStats {
        total,
        changed,
        percentage,
        examples,
    }
}
