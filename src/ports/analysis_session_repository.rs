//! Analysis session repository port.

use crate::domain::analysis_session::{AnalysisSession, LevelResult};
use crate::domain::foundation::{AnalysisSessionId, DomainError};
use async_trait::async_trait;

/// Repository port for AnalysisSession aggregate persistence.
#[async_trait]
pub trait AnalysisSessionRepository: Send + Sync {
    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `StorageError` on persistence failure
    async fn save(&self, session: &AnalysisSession) -> Result<(), DomainError>;

    /// Store level results in an existing session, marking it exported
    /// when `exported` is set. Results for other levels are left alone.
    ///
    /// Applied atomically against the stored session; returns the session
    /// as written.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if session doesn't exist
    /// - `StorageError` on persistence failure
    async fn record_results(
        &self,
        id: &AnalysisSessionId,
        results: Vec<LevelResult>,
        exported: bool,
    ) -> Result<AnalysisSession, DomainError>;

    /// Find a session by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &AnalysisSessionId)
        -> Result<Option<AnalysisSession>, DomainError>;

    /// Number of stored sessions.
    async fn count(&self) -> Result<usize, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_session_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn AnalysisSessionRepository) {}
    }
}
