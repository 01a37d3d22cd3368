//! Errors raised while collecting judgments and analysing levels.

use thiserror::Error;

use crate::domain::ahp::AhpError;
use crate::domain::criteria::CriteriaError;
use crate::domain::expert::ExpertError;
use crate::domain::foundation::{AnalysisSessionId, DomainError, ErrorCode};

/// Errors from judgment submission, level analysis and export.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Expert(#[from] ExpertError),

    #[error(transparent)]
    Criteria(#[from] CriteriaError),

    #[error("Invalid judgment: {0}")]
    Judgment(#[from] AhpError),

    #[error("Comparison ({row}, {col}) has value {value}, which is not on the AHP scale")]
    OffScale { row: usize, col: usize, value: f64 },

    #[error("Comparison ({row}, {col}) was supplied more than once")]
    DuplicateComparison { row: usize, col: usize },

    #[error("Analysis session not found: {0}")]
    SessionNotFound(AnalysisSessionId),

    #[error("No level has enough acceptable judgments to analyse")]
    NoAnalysableResults,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AnalysisError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::Expert(err) => err.code(),
            AnalysisError::Criteria(_) => ErrorCode::LevelNotFound,
            AnalysisError::Judgment(_)
            | AnalysisError::OffScale { .. }
            | AnalysisError::DuplicateComparison { .. } => ErrorCode::InvalidJudgment,
            AnalysisError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            AnalysisError::NoAnalysableResults => ErrorCode::InsufficientData,
            AnalysisError::Domain(err) => err.code,
        }
    }
}
