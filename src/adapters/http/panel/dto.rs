//! Data Transfer Objects for panel HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{Comparison, SubmitJudgmentResult};
use crate::domain::ahp::{ConsistencyResult, Intensity, AHP_SCALE};
use crate::domain::analysis_session::AnalysisSession;
use crate::domain::expert::{Expert, JudgmentRecord};
use crate::domain::foundation::Timestamp;

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

/// Request to register an expert.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterExpertRequest {
    pub badge_number: String,
    pub name: String,
    pub institution: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub research_field: String,
    #[serde(default)]
    pub years_experience: u32,
}

/// Request to submit comparisons for one level.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitJudgmentRequest {
    pub comparisons: Vec<Comparison>,
}

/// Query parameters for level analysis.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeLevelQuery {
    pub session_id: Option<String>,
}

/// Request to create an analysis session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub levels: Vec<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

/// Expert summary.
#[derive(Debug, Clone, Serialize)]
pub struct ExpertResponse {
    pub id: String,
    pub badge_number: String,
    pub name: String,
    pub institution: String,
    pub title: String,
    pub research_field: String,
    pub years_experience: u32,
    pub active: bool,
    pub registered_at: Timestamp,
    pub completed_levels: Vec<String>,
}

impl From<&Expert> for ExpertResponse {
    fn from(expert: &Expert) -> Self {
        let profile = expert.profile();
        Self {
            id: expert.id().to_string(),
            badge_number: profile.badge_number.clone(),
            name: profile.name.clone(),
            institution: profile.institution.clone(),
            title: profile.title.clone(),
            research_field: profile.research_field.clone(),
            years_experience: profile.years_experience,
            active: expert.is_active(),
            registered_at: *expert.registered_at(),
            completed_levels: expert.completed_levels().map(|l| l.to_string()).collect(),
        }
    }
}

/// A stored comparison mapped back onto the scale for re-editing.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonView {
    pub row: usize,
    pub col: usize,
    pub value: f64,
    pub label: String,
}

/// A stored judgment.
#[derive(Debug, Clone, Serialize)]
pub struct JudgmentResponse {
    pub level: String,
    pub weights: Vec<f64>,
    pub consistency: ConsistencyResult,
    pub saved_at: Timestamp,
    pub comparisons: Vec<ComparisonView>,
}

impl JudgmentResponse {
    pub fn new(level: String, record: &JudgmentRecord) -> Self {
        let comparisons = record
            .matrix()
            .upper_triangle()
            .into_iter()
            .map(|((row, col), value)| {
                let step = Intensity::nearest(value);
                ComparisonView {
                    row,
                    col,
                    value: step.value(),
                    label: step.display_label(),
                }
            })
            .collect();

        Self {
            level,
            weights: record.weights().as_slice().to_vec(),
            consistency: *record.consistency(),
            saved_at: *record.saved_at(),
            comparisons,
        }
    }
}

/// Expert with every stored judgment.
#[derive(Debug, Clone, Serialize)]
pub struct ExpertDetailResponse {
    #[serde(flatten)]
    pub expert: ExpertResponse,
    pub judgments: Vec<JudgmentResponse>,
}

impl From<&Expert> for ExpertDetailResponse {
    fn from(expert: &Expert) -> Self {
        Self {
            expert: expert.into(),
            judgments: expert
                .judgments()
                .iter()
                .map(|(level, record)| JudgmentResponse::new(level.to_string(), record))
                .collect(),
        }
    }
}

/// A criterion with its weight.
#[derive(Debug, Clone, Serialize)]
pub struct CriterionWeight {
    pub code: String,
    pub name: String,
    pub weight: f64,
}

/// Result of a submission; weights are listed heaviest first.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitJudgmentResponse {
    pub level: String,
    pub weights: Vec<CriterionWeight>,
    pub consistency: ConsistencyResult,
    pub acceptable: bool,
    pub replaced: bool,
}

impl From<SubmitJudgmentResult> for SubmitJudgmentResponse {
    fn from(result: SubmitJudgmentResult) -> Self {
        let record_weights = result.record.weights();
        let weights = record_weights
            .ranking()
            .into_iter()
            .filter_map(|index| {
                let criterion = result.criteria.get(index)?;
                Some(CriterionWeight {
                    code: criterion.code.clone(),
                    name: criterion.name.clone(),
                    weight: record_weights.get(index)?,
                })
            })
            .collect();

        Self {
            level: result.level.to_string(),
            weights,
            consistency: *result.record.consistency(),
            acceptable: result.record.is_acceptable(),
            replaced: result.replaced,
        }
    }
}

/// Analysis session summary.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub name: String,
    pub description: Option<String>,
    pub levels: Vec<String>,
    pub created_at: Timestamp,
}

impl From<&AnalysisSession> for SessionResponse {
    fn from(session: &AnalysisSession) -> Self {
        Self {
            session_id: session.id().to_string(),
            name: session.name().to_string(),
            description: session.description().map(str::to_string),
            levels: session.levels().iter().map(|l| l.to_string()).collect(),
            created_at: *session.created_at(),
        }
    }
}

/// One step of the judgment scale.
#[derive(Debug, Clone, Serialize)]
pub struct ScaleStepResponse {
    pub value: f64,
    pub notation: String,
    pub label: String,
}

/// The full judgment scale, least to most important.
pub fn scale_steps() -> Vec<ScaleStepResponse> {
    AHP_SCALE
        .iter()
        .map(|step| ScaleStepResponse {
            value: step.value(),
            notation: step.notation(),
            label: step.label().to_string(),
        })
        .collect()
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
