//! Analysis session domain module.
//!
//! A named container for group analysis results, one per hierarchy level.

mod aggregate;
mod level_result;

pub use aggregate::{AnalysisSession, MAX_SESSION_NAME_LENGTH};
pub use level_result::LevelResult;
