use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use uuid::Uuid;

use crate::auth::resolve_current_user;
use crate::errors::AppError;
use crate::models::cover_letter::CoverLetterRow;
use crate::retry::DEFAULT_RETRY;
use crate::state::AppState;

use super::CoverLetterRequest;

/// POST /api/v1/cover-letters
pub async fn handle_generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterRow>, AppError> {
    let user = resolve_current_user(&state.db, &headers).await?;
    let row = super::generate_cover_letter(
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

/// GET /api/v1/cover-letters
pub async fn handle_list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<CoverLetterRow>>, AppError> {
    let user = resolve_current_user(&state.db, &headers).await?;
    let rows = super::list_cover_letters(&state.db, &user).await?;
    Ok(Json(rows))
}

/// GET /api/v1/cover-letters/:id
pub async fn handle_get(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<CoverLetterRow>, AppError> {
    let user = resolve_current_user(&state.db, &headers).await?;
    let row = super::get_cover_letter(&state.db, &user, id).await?;
    Ok(Json(row))
}

/// DELETE /api/v1/cover-letters/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let user = resolve_current_user(&state.db, &headers).await?;
    super::delete_cover_letter(&state.db, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
