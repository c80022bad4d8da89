use axum::{extract::State, http::HeaderMap, Json};
use serde::Deserialize;

use crate::artifact::types::ResumeAnalysisPayload;
use crate::auth::resolve_current_user;
use crate::errors::AppError;
use crate::models::resume::{ResumeRewriteRow, ResumeRow};
use crate::retry::DEFAULT_RETRY;
use crate::state::AppState;

use super::ImproveRequest;

#[derive(Debug, Deserialize)]
pub struct SaveResumeRequest {
    pub content: String,
}

/// PUT /api/v1/resume
pub async fn handle_save(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SaveResumeRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    let user = resolve_current_user(&state.db, &headers).await?;
    let row = super::save_resume(&state.db, &user, &req.content).await?;
    Ok(Json(row))
}

/// GET /api/v1/resume
pub async fn handle_get(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ResumeRow>, AppError> {
    let user = resolve_current_user(&state.db, &headers).await?;
    let row = super::get_resume(&state.db, &user).await?;
    Ok(Json(row))
}

/// POST /api/v1/resume/improve
pub async fn handle_improve(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ImproveRequest>,
) -> Result<Json<ResumeRewriteRow>, AppError> {
    let user = resolve_current_user(&state.db, &headers).await?;
    let row = super::improve_section(
        &state.db,
        &*state.quotas,
        &*state.llm,
        DEFAULT_RETRY,
        &user,
        req,
    )
    .await?;
    Ok(Json(row))
}

/// POST /api/v1/resume/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ResumeAnalysisPayload>, AppError> {
    let user = resolve_current_user(&state.db, &headers).await?;
    let analysis = super::analyze_resume(
        &state.db,
        &*state.quotas,
        &*state.llm,
        DEFAULT_RETRY,
        &user,
    )
    .await?;
    Ok(Json(analysis))
}
