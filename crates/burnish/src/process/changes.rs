//! Change records produced while applying a matcher across a table.

use serde::{Deserialize, Serialize};

/// One cell whose value was altered by matching.
///
/// `row` is the 0-indexed data row; sinks that render a header row
/// must add their own offset (a single header row means visual row
/// `row + 2` in 1-indexed spreadsheet terms) and should verify the
/// cell still holds `canonical` before applying any visual marking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// 0-indexed data row.
    pub row: usize,
    /// Name of the standardized column the value was written to.
    pub column: String,
    /// The source value, verbatim.
    pub original: String,
    /// The canonical substitute.
    pub canonical: String,
}

/// Ordered list of changes: row-major, then column order.
pub type ChangeLog = Vec<ChangeRecord>;
