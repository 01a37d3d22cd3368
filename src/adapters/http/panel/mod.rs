//! HTTP adapter for expert panel endpoints.

mod dto;
mod handlers;
mod routes;

use std::sync::Arc;

use crate::application::handlers::{
    AnalyzeLevelHandler, CreateAnalysisSessionHandler, ExportResultsHandler, GetExpertHandler,
    GetStatisticsHandler, ListExpertsHandler, RegisterExpertHandler, SubmitJudgmentHandler,
};
use crate::domain::criteria::CriteriaHierarchy;
use crate::ports::{AnalysisSessionRepository, ExpertRepository};

pub use dto::{
    AnalyzeLevelQuery, ComparisonView, CreateSessionRequest, CriterionWeight, ErrorResponse,
    ExpertDetailResponse, ExpertResponse, JudgmentResponse, RegisterExpertRequest,
    ScaleStepResponse, SessionResponse, SubmitJudgmentRequest, SubmitJudgmentResponse,
};
pub use handlers::PanelHandlers;
pub use routes::panel_router;

/// Wires every application handler over the given repositories.
pub fn build_handlers(
    experts: Arc<dyn ExpertRepository>,
    sessions: Arc<dyn AnalysisSessionRepository>,
    hierarchy: Arc<CriteriaHierarchy>,
) -> PanelHandlers {
    PanelHandlers {
        register_expert: Arc::new(RegisterExpertHandler::new(experts.clone())),
        get_expert: Arc::new(GetExpertHandler::new(experts.clone())),
        list_experts: Arc::new(ListExpertsHandler::new(experts.clone())),
        submit_judgment: Arc::new(SubmitJudgmentHandler::new(experts.clone(), hierarchy.clone())),
        analyze_level: Arc::new(AnalyzeLevelHandler::new(
            experts.clone(),
            sessions.clone(),
            hierarchy.clone(),
        )),
        create_session: Arc::new(CreateAnalysisSessionHandler::new(
            sessions.clone(),
            hierarchy.clone(),
        )),
        export_results: Arc::new(ExportResultsHandler::new(
            experts.clone(),
            sessions.clone(),
            hierarchy.clone(),
        )),
        statistics: Arc::new(GetStatisticsHandler::new(experts, sessions, hierarchy.clone())),
        hierarchy,
    }
}
