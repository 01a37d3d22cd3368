//! Expert aggregate entity.
//!
//! An expert owns at most one judgment record per hierarchy level. A new
//! submission for a level replaces the previous one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ExpertProfile, JudgmentRecord};
use crate::domain::criteria::HierarchyLevel;
use crate::domain::foundation::{ExpertId, Timestamp};

/// Expert aggregate.
///
/// # Invariants
///
/// - `id` equals `profile.expert_id()`
/// - at most one judgment per level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expert {
    id: ExpertId,
    profile: ExpertProfile,
    #[serde(default = "default_active")]
    active: bool,
    registered_at: Timestamp,
    #[serde(default)]
    judgments: BTreeMap<HierarchyLevel, JudgmentRecord>,
}

fn default_active() -> bool {
    true
}

impl Expert {
    /// Registers a new active expert with no judgments.
    pub fn register(profile: ExpertProfile) -> Self {
        Self {
            id: profile.expert_id(),
            profile,
            active: true,
            registered_at: Timestamp::now(),
            judgments: BTreeMap::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ExpertId {
        &self.id
    }

    pub fn profile(&self) -> &ExpertProfile {
        &self.profile
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn registered_at(&self) -> &Timestamp {
        &self.registered_at
    }

    pub fn judgments(&self) -> &BTreeMap<HierarchyLevel, JudgmentRecord> {
        &self.judgments
    }

    /// Returns the judgment submitted for `level`, if any.
    pub fn judgment_for(&self, level: &HierarchyLevel) -> Option<&JudgmentRecord> {
        self.judgments.get(level)
    }

    /// Levels this expert has judged.
    pub fn completed_levels(&self) -> impl Iterator<Item = &HierarchyLevel> {
        self.judgments.keys()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Stores `record` for `level`, returning the record it replaced.
    pub fn record_judgment(
        &mut self,
        level: HierarchyLevel,
        record: JudgmentRecord,
    ) -> Option<JudgmentRecord> {
        self.judgments.insert(level, record)
    }
}
