//! Pattern learning - building an in-memory pattern set for a job.

use indexmap::{IndexMap, IndexSet};

use crate::error::Result;
use crate::matcher::FuzzyMatcher;
use crate::signature::{clean, signature};

use super::store::PatternStore;

/// Builds the pattern set a [`FuzzyMatcher`] runs against.
///
/// A learner is scoped to one matching job and discarded after it;
/// only the mappings it commits to a [`PatternStore`] outlive the job.
/// The two construction modes are mutually exclusive:
///
/// - [`PatternLearner::reference`] - seed from a trusted reference
///   collection; ephemeral, never persisted.
/// - [`PatternLearner::self_learning`] - seed from the store entries
///   for a column identity, extend via [`learn`](Self::learn), and
///   write the result back with [`commit`](Self::commit).
pub struct PatternLearner {
    /// Column identity for self-learning mode; `None` in reference mode.
    column: Option<String>,
    patterns: IndexMap<String, String>,
}

impl PatternLearner {
    /// Build an ephemeral pattern set from already-canonical values.
    ///
    /// Each non-blank value contributes its cleaned form and, when not
    /// already taken, its signature; both map to the trimmed original
    /// with its casing preserved.
    pub fn reference<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut patterns = IndexMap::new();

        for value in values {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                continue;
            }

            let cleaned = clean(value);
            let sig = signature(&cleaned);
            patterns.insert(cleaned, trimmed.to_string());
            if !patterns.contains_key(&sig) {
                patterns.insert(sig, trimmed.to_string());
            }
        }

        Self {
            column: None,
            patterns,
        }
    }

    /// Start a self-learning job for a column identity, seeded with
    /// every entry already stored for it.
    pub fn self_learning(column: &str, store: &dyn PatternStore) -> Result<Self> {
        let patterns = store.load(column)?;
        Ok(Self {
            column: Some(column.to_string()),
            patterns,
        })
    }

    /// Learn patterns from a column's own values.
    ///
    /// Values are visited as distinct trimmed strings in first-occurrence
    /// order; the first variant of a new signature becomes its canonical
    /// representative ("first value wins"). The cleaned key always maps
    /// to the canonical for its signature, so later variants resolve to
    /// the representative rather than to themselves.
    pub fn learn<'a>(&mut self, values: impl IntoIterator<Item = &'a str>) {
        let mut seen: IndexSet<String> = IndexSet::new();

        for value in values {
            let trimmed = value.trim();
            if trimmed.is_empty() || !seen.insert(trimmed.to_string()) {
                continue;
            }

            let cleaned = clean(value);
            let sig = signature(&cleaned);

            let canonical = self
                .patterns
                .entry(sig)
                .or_insert_with(|| trimmed.to_string())
                .clone();
            if !self.patterns.contains_key(&cleaned) {
                self.patterns.insert(cleaned, canonical);
            }
        }
    }

    /// Upsert every learned entry to the store, keyed by this
    /// learner's column identity.
    ///
    /// No-op in reference mode: reference pattern sets are scoped to
    /// the current job by design.
    pub fn commit(&self, store: &mut dyn PatternStore) -> Result<()> {
        let Some(column) = &self.column else {
            return Ok(());
        };

        for (key, canonical) in &self.patterns {
            store.upsert(column, key, canonical)?;
        }
        Ok(())
    }

    /// Number of entries in the current pattern set.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Finish building and produce an immutable matcher.
    pub fn into_matcher(self) -> FuzzyMatcher {
        FuzzyMatcher::new(self.patterns)
    }
}
