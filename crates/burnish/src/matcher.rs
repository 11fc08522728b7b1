//! Three-tier fuzzy matching against a built pattern set.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::input::CellValue;
use crate::signature::{clean, primary_key, signature};

/// Default similarity threshold for the fuzzy tier.
pub const DEFAULT_THRESHOLD: u8 = 80;

/// Outcome of matching one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// The canonical substitute, or the (trimmed) original when no
    /// pattern applied.
    pub value: CellValue,
    /// True iff the canonical value differs from the trimmed original.
    /// Case-only differences count as changed.
    pub changed: bool,
}

impl MatchResult {
    fn unchanged(value: CellValue) -> Self {
        Self {
            value,
            changed: false,
        }
    }

    fn canonical(canonical: &str, trimmed_original: &str) -> Self {
        Self {
            changed: canonical != trimmed_original,
            value: CellValue::Text(canonical.to_string()),
        }
    }
}

/// Matches values through three escalating tiers: exact cleaned key,
/// exact signature key, then primary-key-filtered fuzzy scoring.
///
/// A matcher is immutable once built; `matches` reads shared state
/// only, so rows and columns can be matched concurrently.
pub struct FuzzyMatcher {
    /// Key -> canonical, in insertion order. Insertion order is the
    /// fuzzy tie-break: the earliest-inserted key wins equal scores.
    patterns: IndexMap<String, String>,
    /// Primary key -> indices into `patterns`, precomputed so the
    /// fuzzy tier scans only plausible candidates.
    by_primary_key: HashMap<String, Vec<usize>>,
}

impl FuzzyMatcher {
    /// Build a matcher over a finished pattern set.
    pub fn new(patterns: IndexMap<String, String>) -> Self {
        let mut by_primary_key: HashMap<String, Vec<usize>> = HashMap::new();

        for (idx, (key, canonical)) in patterns.iter().enumerate() {
            // Signature keys like "PART_0001" carry their own leading
            // run; keys without one fall back to their canonical's.
            let pk = primary_key(key).or_else(|| primary_key(&clean(canonical)));
            if let Some(pk) = pk {
                by_primary_key.entry(pk).or_default().push(idx);
            }
        }

        Self {
            patterns,
            by_primary_key,
        }
    }

    /// Number of pattern entries.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Look up the canonical value for an exact pattern key.
    pub fn canonical_for_key(&self, key: &str) -> Option<&str> {
        self.patterns.get(key).map(String::as_str)
    }

    /// Match one cell against the pattern set.
    ///
    /// Non-text and blank cells pass through unchanged. Text cells are
    /// cleaned, then resolved through the tiers; when nothing matches
    /// at or above `threshold`, the trimmed original comes back with
    /// `changed = false`.
    pub fn matches(&self, value: &CellValue, threshold: u8) -> MatchResult {
        let Some(text) = value.as_text() else {
            return MatchResult::unchanged(value.clone());
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return MatchResult::unchanged(value.clone());
        }

        let cleaned = clean(text);
        let Some(pk) = primary_key(&cleaned) else {
            return MatchResult::unchanged(CellValue::Text(trimmed.to_string()));
        };
        if self.patterns.is_empty() {
            return MatchResult::unchanged(CellValue::Text(trimmed.to_string()));
        }

        // Tier 0: exact cleaned key, then exact signature key.
        if let Some(canonical) = self.patterns.get(&cleaned) {
            return MatchResult::canonical(canonical, trimmed);
        }
        if let Some(canonical) = self.patterns.get(&signature(&cleaned)) {
            return MatchResult::canonical(canonical, trimmed);
        }

        // Tier 1: keep only candidates sharing the input's leading
        // alphanumeric run.
        let Some(candidates) = self.by_primary_key.get(&pk) else {
            return MatchResult::unchanged(CellValue::Text(trimmed.to_string()));
        };

        // Tier 2: normalized edit-distance ratio over the survivors.
        // Strictly-greater comparison keeps the earliest-inserted key
        // on ties, which makes canonicalization reproducible.
        let mut best: Option<(&str, f64)> = None;
        for &idx in candidates {
            if let Some((key, canonical)) = self.patterns.get_index(idx) {
                let score = similarity_ratio(&cleaned, key);
                if best.is_none_or(|(_, s)| score > s) {
                    best = Some((canonical, score));
                }
            }
        }

        if let Some((canonical, score)) = best {
            if score >= f64::from(threshold) {
                return MatchResult::canonical(canonical, trimmed);
            }
        }

        MatchResult::unchanged(CellValue::Text(trimmed.to_string()))
    }
}

/// Normalized Levenshtein similarity in `[0, 100]`.
///
/// `100 * (1 - distance / max(len_a, len_b, 1))`; identical strings
/// score 100.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let max_len = len_a.max(len_b).max(1);
    let distance = levenshtein(a, b);
    100.0 * (1.0 - distance as f64 / max_len as f64)
}

/// Levenshtein (edit) distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Two-row rolling distance table.
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0usize; b_chars.len() + 1];

    for (i, &ca) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}
