//! HTTP routes for expert panel endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    analyze_level, create_session, export_results, get_expert, hierarchy, list_experts,
    register_expert, scale, statistics, submit_judgment, PanelHandlers,
};

/// Creates the panel router with all endpoints.
pub fn panel_router() -> Router<PanelHandlers> {
    Router::new()
        .route("/api/experts", post(register_expert).get(list_experts))
        .route("/api/experts/:id", get(get_expert))
        .route("/api/experts/:id/judgments/:level", put(submit_judgment))
        .route("/api/levels/:level/analysis", get(analyze_level))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id/export", post(export_results))
        .route("/api/statistics", get(statistics))
        .route("/api/hierarchy", get(hierarchy))
        .route("/api/scale", get(scale))
}
