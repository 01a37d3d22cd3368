//! HTTP handlers for expert panel endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::{
    AnalysisError, AnalyzeLevelCommand, AnalyzeLevelHandler, CreateAnalysisSessionCommand,
    CreateAnalysisSessionHandler, ExportResultsCommand, ExportResultsHandler, GetExpertHandler,
    GetStatisticsHandler, ListExpertsHandler, RegisterExpertCommand, RegisterExpertHandler,
    SubmitJudgmentCommand, SubmitJudgmentHandler,
};
use crate::domain::criteria::CriteriaHierarchy;
use crate::domain::expert::ExpertError;
use crate::domain::foundation::{AnalysisSessionId, ErrorCode, ExpertId};

use super::dto::{
    scale_steps, AnalyzeLevelQuery, CreateSessionRequest, ErrorResponse, ExpertDetailResponse,
    ExpertResponse, RegisterExpertRequest, SessionResponse, SubmitJudgmentRequest,
    SubmitJudgmentResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PanelHandlers {
    pub register_expert: Arc<RegisterExpertHandler>,
    pub get_expert: Arc<GetExpertHandler>,
    pub list_experts: Arc<ListExpertsHandler>,
    pub submit_judgment: Arc<SubmitJudgmentHandler>,
    pub analyze_level: Arc<AnalyzeLevelHandler>,
    pub create_session: Arc<CreateAnalysisSessionHandler>,
    pub export_results: Arc<ExportResultsHandler>,
    pub statistics: Arc<GetStatisticsHandler>,
    pub hierarchy: Arc<CriteriaHierarchy>,
}

// ════════════════════════════════════════════════════════════════════════════
// Experts
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/experts - Register an expert
pub async fn register_expert(
    State(handlers): State<PanelHandlers>,
    Json(req): Json<RegisterExpertRequest>,
) -> Response {
    let cmd = RegisterExpertCommand {
        badge_number: req.badge_number,
        name: req.name,
        institution: req.institution,
        title: req.title,
        research_field: req.research_field,
        years_experience: req.years_experience,
    };

    match handlers.register_expert.handle(cmd).await {
        Ok(expert) => (StatusCode::CREATED, Json(ExpertResponse::from(&expert))).into_response(),
        Err(e) => handle_expert_error(e),
    }
}

/// GET /api/experts - List experts
pub async fn list_experts(State(handlers): State<PanelHandlers>) -> Response {
    match handlers.list_experts.handle().await {
        Ok(experts) => {
            let response: Vec<ExpertResponse> = experts.iter().map(ExpertResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_expert_error(e),
    }
}

/// GET /api/experts/:id - Expert with stored judgments
pub async fn get_expert(
    State(handlers): State<PanelHandlers>,
    Path(expert_id): Path<String>,
) -> Response {
    let expert_id = match expert_id.parse::<ExpertId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid expert ID")),
            )
                .into_response()
        }
    };

    match handlers.get_expert.handle(&expert_id).await {
        Ok(expert) => {
            (StatusCode::OK, Json(ExpertDetailResponse::from(&expert))).into_response()
        }
        Err(e) => handle_expert_error(e),
    }
}

/// PUT /api/experts/:id/judgments/:level - Submit comparisons for a level
pub async fn submit_judgment(
    State(handlers): State<PanelHandlers>,
    Path((expert_id, level)): Path<(String, String)>,
    Json(req): Json<SubmitJudgmentRequest>,
) -> Response {
    let expert_id = match expert_id.parse::<ExpertId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid expert ID")),
            )
                .into_response()
        }
    };

    let cmd = SubmitJudgmentCommand {
        expert_id,
        level,
        comparisons: req.comparisons,
    };

    match handlers.submit_judgment.handle(cmd).await {
        Ok(result) => {
            (StatusCode::OK, Json(SubmitJudgmentResponse::from(result))).into_response()
        }
        Err(e) => handle_analysis_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Analysis
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/levels/:level/analysis - Group analysis of one level
pub async fn analyze_level(
    State(handlers): State<PanelHandlers>,
    Path(level): Path<String>,
    Query(query): Query<AnalyzeLevelQuery>,
) -> Response {
    let session_id = match query.session_id.as_deref().map(str::parse::<AnalysisSessionId>) {
        None => None,
        Some(Ok(id)) => Some(id),
        Some(Err(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid session ID")),
            )
                .into_response()
        }
    };

    let cmd = AnalyzeLevelCommand { level, session_id };

    match handlers.analyze_level.handle(cmd).await {
        Ok(analysis) => (StatusCode::OK, Json(analysis)).into_response(),
        Err(e) => handle_analysis_error(e),
    }
}

/// POST /api/sessions - Create an analysis session
pub async fn create_session(
    State(handlers): State<PanelHandlers>,
    Json(req): Json<CreateSessionRequest>,
) -> Response {
    let cmd = CreateAnalysisSessionCommand {
        name: req.name,
        description: req.description,
        levels: req.levels,
    };

    match handlers.create_session.handle(cmd).await {
        Ok(session) => {
            (StatusCode::CREATED, Json(SessionResponse::from(&session))).into_response()
        }
        Err(e) => handle_analysis_error(e),
    }
}

/// POST /api/sessions/:id/export - Comprehensive weight report
pub async fn export_results(
    State(handlers): State<PanelHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match session_id.parse::<AnalysisSessionId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid session ID")),
            )
                .into_response()
        }
    };

    match handlers
        .export_results
        .handle(ExportResultsCommand { session_id })
        .await
    {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => handle_analysis_error(e),
    }
}

/// GET /api/statistics - Data statistics
pub async fn statistics(State(handlers): State<PanelHandlers>) -> Response {
    match handlers.statistics.handle().await {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => handle_analysis_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Reference data
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/hierarchy - The criteria tree
pub async fn hierarchy(State(handlers): State<PanelHandlers>) -> Response {
    (StatusCode::OK, Json(handlers.hierarchy.as_ref().clone())).into_response()
}

/// GET /api/scale - The judgment scale
pub async fn scale() -> Response {
    (StatusCode::OK, Json(scale_steps())).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed | ErrorCode::InvalidJudgment => StatusCode::BAD_REQUEST,
        ErrorCode::ExpertNotFound | ErrorCode::SessionNotFound | ErrorCode::LevelNotFound => {
            StatusCode::NOT_FOUND
        }
        ErrorCode::ExpertAlreadyRegistered => StatusCode::CONFLICT,
        ErrorCode::InsufficientData => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::StorageError | ErrorCode::SerializationError | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_response(code: ErrorCode, message: String) -> Response {
    let status = status_for(code);
    if status.is_server_error() {
        tracing::error!(code = %code, error = %message, "Request failed");
    }
    (status, Json(ErrorResponse::new(code, message))).into_response()
}

fn handle_expert_error(error: ExpertError) -> Response {
    error_response(error.code(), error.to_string())
}

fn handle_analysis_error(error: AnalysisError) -> Response {
    let code = error.code();
    match error {
        AnalysisError::Judgment(ahp) => {
            let mut response = ErrorResponse::new(code, format!("Invalid judgment: {}", ahp));
            if let Some((row, col)) = ahp.index_pair() {
                response = response.with_details(serde_json::json!({ "row": row, "col": col }));
            }
            (status_for(code), Json(response)).into_response()
        }
        other => error_response(code, other.to_string()),
    }
}
