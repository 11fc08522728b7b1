//! Column processing orchestration and change tracking.

mod changes;
mod preview;
mod processor;

pub use changes::{ChangeLog, ChangeRecord};
pub use preview::{PreviewStats, preview};
pub use processor::{
    ColumnProcessor, ProcessOutcome, ProcessRequest, ProcessingMode, STANDARD_SUFFIX,
};
