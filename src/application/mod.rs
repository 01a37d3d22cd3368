//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (write) and query handlers (read) are kept separate.

pub mod handlers;

pub use handlers::{
    // Expert handlers
    Comparison, GetExpertHandler, ListExpertsHandler, RegisterExpertCommand,
    RegisterExpertHandler, SubmitJudgmentCommand, SubmitJudgmentHandler, SubmitJudgmentResult,
    // Analysis handlers
    AnalysisError, AnalyzeLevelCommand, AnalyzeLevelHandler, CreateAnalysisSessionCommand,
    CreateAnalysisSessionHandler, DataStatistics, ExportReport, ExportResultsCommand,
    ExportResultsHandler, GetStatisticsHandler, LevelAnalysis,
};
