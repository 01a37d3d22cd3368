//! Expert-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ExpertId};

/// Expert-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpertError {
    #[error("Expert not found: {0}")]
    NotFound(ExpertId),

    #[error("Expert already registered: {0}")]
    AlreadyRegistered(ExpertId),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl ExpertError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ExpertError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ExpertError::NotFound(_) => ErrorCode::ExpertNotFound,
            ExpertError::AlreadyRegistered(_) => ErrorCode::ExpertAlreadyRegistered,
            ExpertError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ExpertError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
}

impl From<ExpertError> for DomainError {
    fn from(err: ExpertError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string());
        match err {
            ExpertError::NotFound(id) | ExpertError::AlreadyRegistered(id) => {
                domain.with_detail("expert_id", id.as_str())
            }
            ExpertError::ValidationFailed { field, .. } => domain.with_detail("field", field),
            ExpertError::Infrastructure(_) => domain,
        }
    }
}

impl From<DomainError> for ExpertError {
    fn from(err: DomainError) -> Self {
        let expert_id = err
            .details
            .get("expert_id")
            .and_then(|id| ExpertId::new(id.as_str()).ok());
        match (err.code, expert_id) {
            (ErrorCode::ExpertNotFound, Some(id)) => ExpertError::NotFound(id),
            (ErrorCode::ExpertAlreadyRegistered, Some(id)) => ExpertError::AlreadyRegistered(id),
            (ErrorCode::ValidationFailed, _) => ExpertError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => ExpertError::Infrastructure(err.to_string()),
        }
    }
}
