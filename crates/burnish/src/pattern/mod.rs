//! Pattern learning and persistence.

mod learner;
mod store;

pub use learner::PatternLearner;
pub use store::{FilePatternStore, MemoryPatternStore, PatternStore, patterns_path};
