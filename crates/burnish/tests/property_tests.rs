//! Property-based tests for the matching engine.
//!
//! These use proptest to verify the engine's contract under random
//! inputs: no panics, determinism, pass-through, and idempotence of
//! canonicalization once a pattern set is fixed.

use proptest::prelude::*;

use burnish::{CellValue, FuzzyMatcher, MemoryPatternStore, PatternLearner};

// =============================================================================
// Test Strategies
// =============================================================================

/// Strings resembling the part numbers and codes the engine targets.
fn code_like() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z]{1,4}[- ._]?[0-9]{1,5}",
        "[a-z]{1,4}[0-9]{1,4}",
        "[A-Za-z0-9 ._-]{0,12}",
    ]
}

fn column_values() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(code_like(), 1..20)
}

fn threshold() -> impl Strategy<Value = u8> {
    0u8..=100
}

fn build_matcher(values: &[String]) -> FuzzyMatcher {
    let store = MemoryPatternStore::new();
    let mut learner = PatternLearner::self_learning("col", &store).expect("seed");
    learner.learn(values.iter().map(String::as_str));
    learner.into_matcher()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Matching never panics, whatever the inputs.
    #[test]
    fn prop_no_panics(values in column_values(), input in "\\PC{0,30}", t in threshold()) {
        let matcher = build_matcher(&values);
        let _ = matcher.matches(&CellValue::Text(input), t);
    }

    /// Identical input, pattern set, and threshold produce identical
    /// results.
    #[test]
    fn prop_deterministic(values in column_values(), input in code_like(), t in threshold()) {
        let matcher = build_matcher(&values);
        let cell = CellValue::Text(input);

        let first = matcher.matches(&cell, t);
        let second = matcher.matches(&cell, t);
        prop_assert_eq!(first, second);
    }

    /// Non-text and blank cells pass through unchanged regardless of
    /// the pattern set.
    #[test]
    fn prop_pass_through(values in column_values(), n in any::<f64>(), t in threshold()) {
        let matcher = build_matcher(&values);

        let empty = matcher.matches(&CellValue::Empty, t);
        prop_assert_eq!(empty.value, CellValue::Empty);
        prop_assert!(!empty.changed);

        if n.is_finite() {
            let numeric = matcher.matches(&CellValue::Numeric(n), t);
            prop_assert_eq!(numeric.value, CellValue::Numeric(n));
            prop_assert!(!numeric.changed);
        }

        let blank = matcher.matches(&CellValue::Text("  ".to_string()), t);
        prop_assert!(!blank.changed);
    }

    /// Once patterns are fixed, re-matching a canonical result never
    /// reports a change.
    #[test]
    fn prop_idempotent(values in column_values(), t in threshold()) {
        let matcher = build_matcher(&values);

        for value in &values {
            let first = matcher.matches(&CellValue::Text(value.clone()), t);
            let second = matcher.matches(&first.value, t);
            prop_assert!(
                !second.changed,
                "re-matching {:?} (from {:?}) reported a change to {:?}",
                first.value, value, second.value
            );
        }
    }

    /// The changed flag agrees with a string comparison against the
    /// trimmed original.
    #[test]
    fn prop_changed_flag_consistent(values in column_values(), input in code_like(), t in threshold()) {
        let matcher = build_matcher(&values);
        let result = matcher.matches(&CellValue::Text(input.clone()), t);

        if let CellValue::Text(out) = &result.value {
            prop_assert_eq!(result.changed, out.as_str() != input.trim());
        }
    }
}
