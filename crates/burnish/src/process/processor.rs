//! Orchestration: build matchers and apply them across table columns.

use rayon::prelude::*;

use crate::error::{BurnishError, Result};
use crate::input::{CellValue, DataTable};
use crate::matcher::{DEFAULT_THRESHOLD, FuzzyMatcher};
use crate::pattern::{PatternLearner, PatternStore};

use super::changes::{ChangeLog, ChangeRecord};

/// Suffix appended to a source column's name for its standardized
/// counterpart.
pub const STANDARD_SUFFIX: &str = "_std";

/// How canonical forms are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingMode {
    /// Learn canonical forms from each target column itself and
    /// persist them against that column's identity.
    SelfLearning,
    /// Match every target column against a trusted reference column;
    /// nothing is persisted.
    Reference,
}

/// A processing request, validated before any side effect.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProcessRequest {
    pub mode: ProcessingMode,
    pub target_columns: Vec<String>,
    pub reference_column: Option<String>,
    pub threshold: u8,
}

impl ProcessRequest {
    /// Self-learning request with the default threshold.
    pub fn self_learning(target_columns: Vec<String>) -> Self {
        Self {
            mode: ProcessingMode::SelfLearning,
            target_columns,
            reference_column: None,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Reference-mode request with the default threshold.
    pub fn reference(target_columns: Vec<String>, reference_column: String) -> Self {
        Self {
            mode: ProcessingMode::Reference,
            target_columns,
            reference_column: Some(reference_column),
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Override the fuzzy threshold.
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Target columns that actually get matched: in reference mode the
    /// reference column is excluded from its own match set.
    pub fn effective_targets(&self) -> Vec<&str> {
        self.target_columns
            .iter()
            .map(String::as_str)
            .filter(|c| self.reference_column.as_deref() != Some(*c))
            .collect()
    }

    /// Check the request against a table. Runs before any persistence
    /// or output write.
    pub fn validate(&self, table: &DataTable) -> Result<()> {
        if self.target_columns.is_empty() {
            return Err(BurnishError::Validation(
                "No target columns selected".to_string(),
            ));
        }
        if self.threshold > 100 {
            return Err(BurnishError::Validation(format!(
                "Threshold must be in 0..=100, got {}",
                self.threshold
            )));
        }
        if self.mode == ProcessingMode::Reference {
            let Some(reference) = self.reference_column.as_deref() else {
                return Err(BurnishError::Validation(
                    "Reference mode requires a reference column".to_string(),
                ));
            };
            if table.column_index(reference).is_none() {
                return Err(BurnishError::Validation(format!(
                    "Reference column '{}' not found",
                    reference
                )));
            }
        }
        Ok(())
    }
}

/// The augmented table plus the full change log.
#[derive(Debug)]
pub struct ProcessOutcome {
    pub table: DataTable,
    pub changes: ChangeLog,
}

/// Applies a processing request to a table.
///
/// For each target column a `<name>_std` column is inserted directly
/// after the source column (or replaced in place on reprocessing), and
/// every altered cell is appended to the change log.
pub struct ColumnProcessor;

impl ColumnProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Process a table. Self-learning commits learned patterns to the
    /// store per column; a store failure aborts the request, leaving
    /// columns committed earlier in the batch durable.
    pub fn process(
        &self,
        table: &DataTable,
        request: &ProcessRequest,
        store: &mut dyn PatternStore,
    ) -> Result<ProcessOutcome> {
        request.validate(table)?;

        let mut out = table.clone();
        let mut changes: ChangeLog = Vec::new();

        match request.mode {
            ProcessingMode::Reference => {
                let matcher = build_reference_matcher(table, request)?;
                for column in request.effective_targets() {
                    apply_column(&mut out, column, &matcher, request.threshold, &mut changes);
                }
            }
            ProcessingMode::SelfLearning => {
                for column in request.effective_targets() {
                    let Some(learner) = learn_column(table, column, store)? else {
                        continue;
                    };
                    // Persist before emitting the column so a store
                    // failure never leaves a half-standardized column.
                    learner.commit(store)?;
                    let matcher = learner.into_matcher();
                    apply_column(&mut out, column, &matcher, request.threshold, &mut changes);
                }
            }
        }

        sort_row_major(&mut changes, &out);

        Ok(ProcessOutcome {
            table: out,
            changes,
        })
    }
}

impl Default for ColumnProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the shared matcher for a reference-mode request.
pub(crate) fn build_reference_matcher(
    table: &DataTable,
    request: &ProcessRequest,
) -> Result<FuzzyMatcher> {
    let reference = request.reference_column.as_deref().ok_or_else(|| {
        BurnishError::Validation("Reference mode requires a reference column".to_string())
    })?;
    let idx = table.column_index(reference).ok_or_else(|| {
        BurnishError::Validation(format!("Reference column '{}' not found", reference))
    })?;

    let mut seen = indexmap::IndexSet::new();
    for cell in table.column_values(idx) {
        if let Some(text) = cell.as_text() {
            if !text.trim().is_empty() {
                seen.insert(text.to_string());
            }
        }
    }

    Ok(PatternLearner::reference(seen.iter().map(String::as_str)).into_matcher())
}

/// Build a learner for one column in self-learning mode, without
/// committing. Returns `None` when the column is absent (absent target
/// columns are skipped, matching the processor's contract).
pub(crate) fn learn_column(
    table: &DataTable,
    column: &str,
    store: &dyn PatternStore,
) -> Result<Option<PatternLearner>> {
    let Some(idx) = table.column_index(column) else {
        return Ok(None);
    };

    let mut learner = PatternLearner::self_learning(column, store)?;
    let values: Vec<&str> = table
        .column_values(idx)
        .filter_map(CellValue::as_text)
        .collect();
    learner.learn(values);
    Ok(Some(learner))
}

/// Match every cell of one column and insert (or refresh) its
/// standardized sibling column.
fn apply_column(
    out: &mut DataTable,
    column: &str,
    matcher: &FuzzyMatcher,
    threshold: u8,
    changes: &mut ChangeLog,
) {
    let Some(src_idx) = out.column_index(column) else {
        return;
    };
    let std_name = format!("{}{}", column, STANDARD_SUFFIX);

    let cells: Vec<CellValue> = out.column_values(src_idx).cloned().collect();

    // Matching is a pure read on the built matcher, so rows can be
    // scored in parallel; collect() keeps row order.
    let results: Vec<_> = cells
        .par_iter()
        .map(|cell| matcher.matches(cell, threshold))
        .collect();

    let mut std_values = Vec::with_capacity(results.len());
    for (row, (cell, result)) in cells.iter().zip(results).enumerate() {
        if result.changed {
            changes.push(ChangeRecord {
                row,
                column: std_name.clone(),
                original: cell.as_text().unwrap_or_default().to_string(),
                canonical: result.value.to_string(),
            });
        }
        std_values.push(result.value);
    }

    // Reprocessing must refresh the existing _std column instead of
    // inserting a duplicate.
    match out.column_index(&std_name) {
        Some(existing) => out.replace_column(existing, std_values),
        None => out.insert_column(src_idx + 1, std_name, std_values),
    }
}

/// Order the change log row-major, with ties broken by the column's
/// position in the augmented table.
fn sort_row_major(changes: &mut ChangeLog, table: &DataTable) {
    changes.sort_by_key(|c| {
        (
            c.row,
            table.column_index(&c.column).unwrap_or(usize::MAX),
        )
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::MemoryPatternStore;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn table(headers: &[&str], rows: &[&[CellValue]]) -> DataTable {
        DataTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter().map(|r| r.to_vec()).collect(),
            b',',
        )
    }

    #[test]
    fn test_validation_empty_targets() {
        let t = table(&["part"], &[&[text("A100")]]);
        let request = ProcessRequest::self_learning(vec![]);
        let mut store = MemoryPatternStore::new();

        let err = ColumnProcessor::new()
            .process(&t, &request, &mut store)
            .unwrap_err();
        assert!(matches!(err, BurnishError::Validation(_)));
    }

    #[test]
    fn test_validation_missing_reference_column() {
        let t = table(&["part"], &[&[text("A100")]]);
        let request = ProcessRequest::reference(vec!["part".into()], "standard".into());
        let mut store = MemoryPatternStore::new();

        let err = ColumnProcessor::new()
            .process(&t, &request, &mut store)
            .unwrap_err();
        assert!(matches!(err, BurnishError::Validation(_)));
        // Validation failed before any persistence.
        assert_eq!(store.entry_count("part"), 0);
    }

    #[test]
    fn test_self_learning_scenario() {
        let t = table(
            &["part"],
            &[
                &[text("A100")],
                &[text("a-100")],
                &[text("A 100")],
                &[text("B200")],
            ],
        );
        let request = ProcessRequest::self_learning(vec!["part".into()]);
        let mut store = MemoryPatternStore::new();

        let outcome = ColumnProcessor::new()
            .process(&t, &request, &mut store)
            .unwrap();

        assert_eq!(outcome.table.headers, vec!["part", "part_std"]);
        let std_col: Vec<_> = outcome.table.column_values(1).cloned().collect();
        assert_eq!(
            std_col,
            vec![text("A100"), text("A100"), text("A100"), text("B200")]
        );

        assert_eq!(outcome.changes.len(), 2);
        assert_eq!(outcome.changes[0].row, 1);
        assert_eq!(outcome.changes[0].original, "a-100");
        assert_eq!(outcome.changes[0].canonical, "A100");
        assert_eq!(outcome.changes[1].row, 2);

        // Learned patterns were committed against the column identity.
        let stored = store.load("part").unwrap();
        assert_eq!(stored.get("A_100").map(String::as_str), Some("A100"));
    }

    #[test]
    fn test_reference_mode_excludes_reference_column() {
        let t = table(
            &["standard", "observed"],
            &[
                &[text("X1"), text("x-1")],
                &[text("X1"), text("X 1")],
                &[CellValue::Empty, text("x1")],
            ],
        );
        let request = ProcessRequest::reference(
            vec!["standard".into(), "observed".into()],
            "standard".into(),
        );
        let mut store = MemoryPatternStore::new();

        let outcome = ColumnProcessor::new()
            .process(&t, &request, &mut store)
            .unwrap();

        // Only the observed column gained a standardized sibling.
        assert_eq!(
            outcome.table.headers,
            vec!["standard", "observed", "observed_std"]
        );
        let std_col: Vec<_> = outcome.table.column_values(2).cloned().collect();
        assert_eq!(std_col, vec![text("X1"), text("X1"), text("X1")]);
        // All three differ from their trimmed originals, case-only
        // difference included.
        assert_eq!(outcome.changes.len(), 3);

        // Reference mode never persists.
        assert_eq!(store.entry_count("standard"), 0);
        assert_eq!(store.entry_count("observed"), 0);
    }

    #[test]
    fn test_non_text_cells_pass_through() {
        let t = table(
            &["part"],
            &[
                &[CellValue::Numeric(42.0)],
                &[CellValue::Empty],
                &[text("A100")],
            ],
        );
        let request = ProcessRequest::self_learning(vec!["part".into()]);
        let mut store = MemoryPatternStore::new();

        let outcome = ColumnProcessor::new()
            .process(&t, &request, &mut store)
            .unwrap();

        let std_col: Vec<_> = outcome.table.column_values(1).cloned().collect();
        assert_eq!(
            std_col,
            vec![CellValue::Numeric(42.0), CellValue::Empty, text("A100")]
        );
        assert!(outcome.changes.is_empty());
    }

    #[test]
    fn test_reprocessing_does_not_duplicate_column() {
        let t = table(&["part"], &[&[text("A100")], &[text("a-100")]]);
        let request = ProcessRequest::self_learning(vec!["part".into()]);
        let mut store = MemoryPatternStore::new();
        let processor = ColumnProcessor::new();

        let first = processor.process(&t, &request, &mut store).unwrap();
        let second = processor
            .process(&first.table, &request, &mut store)
            .unwrap();

        assert_eq!(second.table.headers, vec!["part", "part_std"]);
    }

    #[test]
    fn test_change_log_row_major_order() {
        let t = table(
            &["a", "b"],
            &[
                &[text("P-1"), text("q-1")],
                &[text("p 1"), text("Q1")],
            ],
        );
        let request = ProcessRequest::self_learning(vec!["a".into(), "b".into()]);
        let mut store = MemoryPatternStore::new();

        let outcome = ColumnProcessor::new()
            .process(&t, &request, &mut store)
            .unwrap();

        // Rows ascend first; within a row, table column order.
        let order: Vec<_> = outcome
            .changes
            .iter()
            .map(|c| (c.row, c.column.as_str()))
            .collect();
        let mut sorted = order.clone();
        sorted.sort_by_key(|(row, col)| {
            (*row, outcome.table.column_index(col).unwrap_or(usize::MAX))
        });
        assert_eq!(order, sorted);

        // Every record agrees with the cell the table actually holds.
        for change in &outcome.changes {
            let col = outcome.table.column_index(&change.column).unwrap();
            assert_eq!(
                outcome.table.get(change.row, col),
                Some(&text(&change.canonical))
            );
        }
    }

    #[test]
    fn test_persistence_failure_aborts_request() {
        struct FailingStore {
            inner: MemoryPatternStore,
            fail_on_column: String,
        }

        impl PatternStore for FailingStore {
            fn load(&self, column: &str) -> crate::Result<indexmap::IndexMap<String, String>> {
                self.inner.load(column)
            }

            fn upsert(&mut self, column: &str, key: &str, canonical: &str) -> crate::Result<()> {
                if column == self.fail_on_column {
                    return Err(BurnishError::Persistence("store unavailable".to_string()));
                }
                self.inner.upsert(column, key, canonical)
            }
        }

        let t = table(
            &["a", "b"],
            &[&[text("A100"), text("B200")], &[text("a-100"), text("b 200")]],
        );
        let request = ProcessRequest::self_learning(vec!["a".into(), "b".into()]);
        let mut store = FailingStore {
            inner: MemoryPatternStore::new(),
            fail_on_column: "b".to_string(),
        };

        let err = ColumnProcessor::new()
            .process(&t, &request, &mut store)
            .unwrap_err();
        assert!(matches!(err, BurnishError::Persistence(_)));

        // Column "a" was fully committed before the failure and stays.
        assert!(store.inner.entry_count("a") > 0);
        assert_eq!(store.inner.entry_count("b"), 0);
    }
}
