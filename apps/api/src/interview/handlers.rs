use axum::{extract::State, http::HeaderMap, Json};

use crate::artifact::types::QuizPayload;
use crate::auth::resolve_current_user;
use crate::errors::AppError;
use crate::models::assessment::AssessmentRow;
use crate::retry::DEFAULT_RETRY;
use crate::state::AppState;

use super::SaveResultRequest;

/// POST /api/v1/interview/quiz
pub async fn handle_generate_quiz(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<QuizPayload>, AppError> {
    let user = resolve_current_user(&state.db, &headers).await?;
    let quiz = super::generate_quiz(&*state.quotas, &*state.llm, DEFAULT_RETRY, &user).await?;
    Ok(Json(quiz))
}

/// POST /api/v1/interview/results
pub async fn handle_save_result(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SaveResultRequest>,
) -> Result<Json<AssessmentRow>, AppError> {
    let user = resolve_current_user(&state.db, &headers).await?;
    let row = super::save_quiz_result(&state.db, &*state.llm, DEFAULT_RETRY, &user, req).await?;
    Ok(Json(row))
}

/// GET /api/v1/interview/results
pub async fn handle_list_results(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<AssessmentRow>>, AppError> {
    let user = resolve_current_user(&state.db, &headers).await?;
    let rows = super::list_assessments(&state.db, &user).await?;
    Ok(Json(rows))
}
