//! JSON File Store Adapter
//!
//! Keeps every expert and analysis session in one JSON document on disk.
//! The document is loaded once, mutated under a lock, and rewritten through
//! a temporary file followed by a rename.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::analysis_session::{AnalysisSession, LevelResult};
use crate::domain::criteria::HierarchyLevel;
use crate::domain::expert::{Expert, ExpertError, JudgmentRecord};
use crate::domain::foundation::{AnalysisSessionId, DomainError, ErrorCode, ExpertId, Timestamp};
use crate::ports::{AnalysisSessionRepository, ExpertRepository};

/// Format version written into the document metadata.
pub const STORE_FORMAT_VERSION: &str = "1.0";

/// Bookkeeping stored alongside the data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMetadata {
    pub created_at: Timestamp,
    pub last_modified: Timestamp,
    pub version: String,
    #[serde(default)]
    pub total_experts: usize,
}

/// On-disk document layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    experts: BTreeMap<ExpertId, Expert>,
    #[serde(default)]
    analysis_sessions: BTreeMap<AnalysisSessionId, AnalysisSession>,
    metadata: StoreMetadata,
}

impl StoreDocument {
    fn empty() -> Self {
        let now = Timestamp::now();
        Self {
            experts: BTreeMap::new(),
            analysis_sessions: BTreeMap::new(),
            metadata: StoreMetadata {
                created_at: now,
                last_modified: now,
                version: STORE_FORMAT_VERSION.to_string(),
                total_experts: 0,
            },
        }
    }
}

/// File-backed store implementing both repository ports.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    document: Mutex<StoreDocument>,
}

impl JsonFileStore {
    /// Opens the store at `path`, creating the file if it is missing.
    ///
    /// A file that cannot be parsed is replaced by an empty document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file cannot be read or written.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, DomainError> {
        let path = path.as_ref().to_path_buf();

        let document = match fs::read_to_string(&path).await {
            Ok(json) => match serde_json::from_str::<StoreDocument>(&json) {
                Ok(document) => Some(document),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Data file is corrupt, reinitialising"
                    );
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(DomainError::storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let store = match document {
            Some(document) => Self {
                path,
                document: Mutex::new(document),
            },
            None => {
                let document = StoreDocument::empty();
                write_document(&path, &document).await?;
                tracing::info!(path = %path.display(), "Initialised data file");
                Self {
                    path,
                    document: Mutex::new(document),
                }
            }
        };

        Ok(store)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the document metadata.
    pub async fn metadata(&self) -> StoreMetadata {
        self.document.lock().await.metadata.clone()
    }

    /// Applies `mutate` to the document and persists it.
    ///
    /// The lock is held from read to write, so every mutation sees the
    /// previous one. The in-memory document only changes if both the
    /// mutation and the write succeed.
    async fn commit<T, F>(&self, mutate: F) -> Result<T, DomainError>
    where
        T: Send,
        F: FnOnce(&mut StoreDocument) -> Result<T, DomainError> + Send,
    {
        let mut guard = self.document.lock().await;
        let mut next = guard.clone();
        let outcome = mutate(&mut next)?;
        next.metadata.last_modified = Timestamp::now();
        next.metadata.total_experts = next.experts.len();

        write_document(&self.path, &next).await?;
        *guard = next;
        Ok(outcome)
    }
}

async fn write_document(path: &Path, document: &StoreDocument) -> Result<(), DomainError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
    }

    let json = serde_json::to_string_pretty(document)?;
    let temp_path = path.with_extension("json.tmp");

    fs::write(&temp_path, json)
        .await
        .map_err(|e| DomainError::storage(e.to_string()))?;
    fs::rename(&temp_path, path)
        .await
        .map_err(|e| DomainError::storage(e.to_string()))?;

    Ok(())
}

#[async_trait]
impl ExpertRepository for JsonFileStore {
    async fn register(&self, expert: &Expert) -> Result<(), DomainError> {
        self.commit(|doc| {
            if doc.experts.contains_key(expert.id()) {
                return Err(ExpertError::AlreadyRegistered(expert.id().clone()).into());
            }
            doc.experts.insert(expert.id().clone(), expert.clone());
            Ok(())
        })
        .await?;

        tracing::debug!(expert_id = %expert.id(), "Expert persisted");
        Ok(())
    }

    async fn record_judgment(
        &self,
        id: &ExpertId,
        level: HierarchyLevel,
        record: JudgmentRecord,
    ) -> Result<bool, DomainError> {
        self.commit(|doc| {
            let expert = doc
                .experts
                .get_mut(id)
                .ok_or_else(|| ExpertError::NotFound(id.clone()))?;
            Ok(expert.record_judgment(level, record).is_some())
        })
        .await
    }

    async fn find_by_id(&self, id: &ExpertId) -> Result<Option<Expert>, DomainError> {
        Ok(self.document.lock().await.experts.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Expert>, DomainError> {
        Ok(self.document.lock().await.experts.values().cloned().collect())
    }

    async fn last_modified(&self) -> Result<Option<Timestamp>, DomainError> {
        Ok(Some(self.document.lock().await.metadata.last_modified))
    }
}

#[async_trait]
impl AnalysisSessionRepository for JsonFileStore {
    async fn save(&self, session: &AnalysisSession) -> Result<(), DomainError> {
        self.commit(|doc| {
            doc.analysis_sessions.insert(*session.id(), session.clone());
            Ok(())
        })
        .await?;

        tracing::debug!(session_id = %session.id(), "Analysis session persisted");
        Ok(())
    }

    async fn record_results(
        &self,
        id: &AnalysisSessionId,
        results: Vec<LevelResult>,
        exported: bool,
    ) -> Result<AnalysisSession, DomainError> {
        self.commit(|doc| {
            let session = doc.analysis_sessions.get_mut(id).ok_or_else(|| {
                DomainError::new(
                    ErrorCode::SessionNotFound,
                    format!("Analysis session not found: {}", id),
                )
            })?;
            for result in results {
                session.record_result(result);
            }
            if exported {
                session.mark_exported();
            }
            Ok(session.clone())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: &AnalysisSessionId,
    ) -> Result<Option<AnalysisSession>, DomainError> {
        Ok(self.document.lock().await.analysis_sessions.get(id).cloned())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.document.lock().await.analysis_sessions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ahp::JudgmentMatrix;
    use crate::domain::criteria::EVALUATION_SYSTEM;
    use crate::domain::expert::ExpertProfile;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn test_expert(badge: &str) -> Expert {
        let profile =
            ExpertProfile::new(badge, "Wang Fang", "Zhejiang University", "Professor", "HCI", 20)
                .unwrap();
        Expert::register(profile)
    }

    #[tokio::test]
    async fn test_open_creates_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("expert_data.json");

        let store = JsonFileStore::open(&path).await.unwrap();

        assert!(path.exists());
        let metadata = store.metadata().await;
        assert_eq!(metadata.version, STORE_FORMAT_VERSION);
        assert_eq!(metadata.total_experts, 0);
    }

    #[tokio::test]
    async fn test_data_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expert_data.json");

        let mut expert = test_expert("E-1");
        expert.record_judgment(
            HierarchyLevel::Top,
            JudgmentRecord::assess(JudgmentMatrix::identity(4).unwrap()).unwrap(),
        );
        {
            let store = JsonFileStore::open(&path).await.unwrap();
            store.register(&expert).await.unwrap();
        }

        let reopened = JsonFileStore::open(&path).await.unwrap();
        let found = ExpertRepository::find_by_id(&reopened, expert.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, expert);
        assert_eq!(reopened.metadata().await.total_experts, 1);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reinitialised() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expert_data.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::open(&path).await.unwrap();

        assert!(store.list_all().await.unwrap().is_empty());
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"metadata\""));
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_document_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(temp_dir.path().join("d.json")).await.unwrap();
        let expert = test_expert("E-1");
        store.register(&expert).await.unwrap();

        let err = store.register(&expert).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ExpertAlreadyRegistered);
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_record_results_requires_existing_session() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(temp_dir.path().join("d.json")).await.unwrap();
        let session = AnalysisSession::new("Round 1", None, vec![]).unwrap();

        let err = store
            .record_results(session.id(), vec![], true)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNotFound);

        store.save(&session).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
        let written = store.record_results(session.id(), vec![], true).await.unwrap();
        assert!(written.exported_at().is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_judgments_are_not_lost() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expert_data.json");
        let store = Arc::new(JsonFileStore::open(&path).await.unwrap());
        let expert = test_expert("E-1");
        store.register(&expert).await.unwrap();

        let levels = EVALUATION_SYSTEM.levels();
        for _ in 0..10 {
            let tasks: Vec<_> = levels
                .iter()
                .cloned()
                .map(|level| {
                    let store = store.clone();
                    let id = expert.id().clone();
                    let n = EVALUATION_SYSTEM.order_of(&level).unwrap();
                    let record =
                        JudgmentRecord::assess(JudgmentMatrix::identity(n).unwrap()).unwrap();
                    tokio::spawn(async move { store.record_judgment(&id, level, record).await })
                })
                .collect();
            for task in tasks {
                task.await.unwrap().unwrap();
            }
        }

        let reopened = JsonFileStore::open(&path).await.unwrap();
        let stored = ExpertRepository::find_by_id(&reopened, expert.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.completed_levels().count(), levels.len());
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expert_data.json");
        let store = JsonFileStore::open(&path).await.unwrap();
        store.register(&test_expert("E-1")).await.unwrap();

        assert!(!path.with_extension("json.tmp").exists());
    }
}
