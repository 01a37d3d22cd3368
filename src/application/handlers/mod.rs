//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod analysis;
pub mod expert;

pub use analysis::{
    AnalysisError, AnalysisQuality, AnalyzeLevelCommand, AnalyzeLevelHandler,
    CreateAnalysisSessionCommand, CreateAnalysisSessionHandler, DataStatistics, ExportReport,
    ExportResultsCommand, ExportResultsHandler, GetStatisticsHandler, HierarchyRow,
    LevelAnalysis, LevelCompletion, LevelWeights, SkippedLevel,
};
pub use expert::{
    Comparison, GetExpertHandler, ListExpertsHandler, RegisterExpertCommand,
    RegisterExpertHandler, SubmitJudgmentCommand, SubmitJudgmentHandler, SubmitJudgmentResult,
};
