//! Structural signature extraction for part-number-like strings.
//!
//! Matching never operates on raw cell text. Every value is first
//! cleaned (trimmed, upper-cased), then reduced to a structural
//! signature: the letter sequence and the digit sequence with
//! everything else stripped. `"a-100"`, `"A 100"`, and `"A100"` all
//! share the signature `A_100`.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALPHA: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z]").unwrap());
static NON_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").unwrap());

/// Trim and upper-case a raw value for matching.
pub fn clean(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Structural signature of a cleaned value: `<letters>_<digits>`.
///
/// Characters keep their original relative order within each class, so
/// two values collapse to the same signature iff they agree on both
/// the letter sequence and the digit sequence.
pub fn signature(cleaned: &str) -> String {
    let alpha = NON_ALPHA.replace_all(cleaned, "");
    let numeric = NON_NUMERIC.replace_all(cleaned, "");
    format!("{}_{}", alpha, numeric)
}

/// Longest leading alphanumeric run of a cleaned value.
///
/// Returns `None` when the value does not start with a letter or
/// digit; such values cannot be pre-filtered for fuzzy matching.
pub fn primary_key(cleaned: &str) -> Option<String> {
    let run: String = cleaned
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if run.is_empty() { None } else { Some(run) }
}
