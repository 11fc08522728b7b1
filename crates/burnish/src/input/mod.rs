//! Input parsing and tabular data model.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig};
pub use source::{CellValue, DataTable, SourceMetadata};
