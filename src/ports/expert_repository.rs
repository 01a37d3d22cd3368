//! Expert repository port.
//!
//! Defines the contract for persisting and retrieving Expert aggregates,
//! including the judgment records they own.

use crate::domain::criteria::HierarchyLevel;
use crate::domain::expert::{Expert, JudgmentRecord};
use crate::domain::foundation::{DomainError, ExpertId, Timestamp};
use async_trait::async_trait;

/// Repository port for Expert aggregate persistence.
#[async_trait]
pub trait ExpertRepository: Send + Sync {
    /// Save a newly registered expert.
    ///
    /// # Errors
    ///
    /// - `ExpertAlreadyRegistered` if an expert with the same id exists
    /// - `StorageError` on persistence failure
    async fn register(&self, expert: &Expert) -> Result<(), DomainError>;

    /// Attach `record` to the expert's `level`, replacing any earlier record.
    ///
    /// The load, change and write happen as one step so concurrent
    /// submissions for different levels of the same expert all survive.
    /// Returns true when an earlier record was replaced.
    ///
    /// # Errors
    ///
    /// - `ExpertNotFound` if the expert doesn't exist
    /// - `StorageError` on persistence failure
    async fn record_judgment(
        &self,
        id: &ExpertId,
        level: HierarchyLevel,
        record: JudgmentRecord,
    ) -> Result<bool, DomainError>;

    /// Find an expert by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &ExpertId) -> Result<Option<Expert>, DomainError>;

    /// All experts, ordered by id.
    async fn list_all(&self) -> Result<Vec<Expert>, DomainError>;

    /// Time of the most recent write, if anything was ever written.
    async fn last_modified(&self) -> Result<Option<Timestamp>, DomainError>;
}
