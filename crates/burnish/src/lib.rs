//! Burnish: fuzzy standardization for noisy tabular columns.
//!
//! Burnish collapses inconsistent string values (part numbers, codes)
//! in a column into a small set of canonical forms. Canonical forms
//! are either learned from the column itself and persisted per column
//! identity, or taken from a trusted reference column for the current
//! job only.
//!
//! # Matching tiers
//!
//! Every value passes through three escalating tiers: exact cleaned-key
//! lookup, exact structural-signature lookup, then fuzzy scoring over
//! candidates sharing the value's leading alphanumeric run.
//!
//! # Example
//!
//! ```no_run
//! use burnish::{ColumnProcessor, MemoryPatternStore, Parser, ProcessRequest};
//!
//! let (table, _meta) = Parser::new().parse_file("parts.csv").unwrap();
//! let request = ProcessRequest::self_learning(vec!["part_no".to_string()]);
//! let mut store = MemoryPatternStore::new();
//!
//! let outcome = ColumnProcessor::new()
//!     .process(&table, &request, &mut store)
//!     .unwrap();
//! println!("{} values standardized", outcome.changes.len());
//! ```

pub mod error;
pub mod input;
pub mod matcher;
pub mod output;
pub mod pattern;
pub mod process;
pub mod signature;

pub use error::{BurnishError, Result};
pub use input::{CellValue, DataTable, Parser, ParserConfig, SourceMetadata};
pub use matcher::{DEFAULT_THRESHOLD, FuzzyMatcher, MatchResult};
pub use pattern::{FilePatternStore, MemoryPatternStore, PatternLearner, PatternStore};
pub use process::{
    ChangeLog, ChangeRecord, ColumnProcessor, PreviewStats, ProcessOutcome, ProcessRequest,
    ProcessingMode, STANDARD_SUFFIX, preview,
};
