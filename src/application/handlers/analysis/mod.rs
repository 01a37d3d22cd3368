//! Analysis command and query handlers.
//!
//! Group analysis per level, analysis sessions, comprehensive export and
//! data statistics.

mod analyze_level;
mod create_session;
mod errors;
mod export_results;
mod statistics;

pub use analyze_level::{AnalyzeLevelCommand, AnalyzeLevelHandler, LevelAnalysis};
pub use create_session::{CreateAnalysisSessionCommand, CreateAnalysisSessionHandler};
pub use errors::AnalysisError;
pub use export_results::{
    AnalysisQuality, ExportReport, ExportResultsCommand, ExportResultsHandler, HierarchyRow,
    LevelWeights, SkippedLevel,
};
pub use statistics::{DataStatistics, GetStatisticsHandler, LevelCompletion};
