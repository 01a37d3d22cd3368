//! Analysis session aggregate entity.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::LevelResult;
use crate::domain::criteria::HierarchyLevel;
use crate::domain::foundation::{AnalysisSessionId, DomainError, Timestamp};

/// Maximum length for a session name.
pub const MAX_SESSION_NAME_LENGTH: usize = 200;

/// Analysis session aggregate.
///
/// # Invariants
///
/// - `name` is 1-200 characters after trimming
/// - at most one result per level; a newer analysis replaces the older
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSession {
    id: AnalysisSessionId,
    name: String,
    description: Option<String>,
    levels: Vec<HierarchyLevel>,
    created_at: Timestamp,
    #[serde(default)]
    results: BTreeMap<HierarchyLevel, LevelResult>,
    #[serde(default)]
    exported_at: Option<Timestamp>,
}

impl AnalysisSession {
    /// Create a new empty session covering `levels`.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if name is empty or too long
    pub fn new(
        name: &str,
        description: Option<String>,
        levels: Vec<HierarchyLevel>,
    ) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name", "Session name cannot be empty"));
        }
        if name.chars().count() > MAX_SESSION_NAME_LENGTH {
            return Err(DomainError::validation(
                "name",
                format!("Session name cannot exceed {} characters", MAX_SESSION_NAME_LENGTH),
            ));
        }

        Ok(Self {
            id: AnalysisSessionId::new(),
            name: name.to_string(),
            description: description.filter(|d| !d.trim().is_empty()),
            levels,
            created_at: Timestamp::now(),
            results: BTreeMap::new(),
            exported_at: None,
        })
    }

    pub fn id(&self) -> &AnalysisSessionId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn levels(&self) -> &[HierarchyLevel] {
        &self.levels
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn results(&self) -> &BTreeMap<HierarchyLevel, LevelResult> {
        &self.results
    }

    pub fn result_for(&self, level: &HierarchyLevel) -> Option<&LevelResult> {
        self.results.get(level)
    }

    pub fn exported_at(&self) -> Option<&Timestamp> {
        self.exported_at.as_ref()
    }

    /// Stores a level result, adding the level to the session if absent.
    pub fn record_result(&mut self, result: LevelResult) {
        if !self.levels.contains(&result.level) {
            self.levels.push(result.level.clone());
        }
        self.results.insert(result.level.clone(), result);
    }

    pub fn mark_exported(&mut self) {
        self.exported_at = Some(Timestamp::now());
    }
}
