use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};

use crate::auth::resolve_current_user;
use crate::errors::AppError;
use crate::models::insight::IndustryInsightRow;
use crate::retry::DEFAULT_RETRY;
use crate::state::AppState;
use crate::workflow::StepRunner;

use super::batch::{self, BatchRunReport, INTER_INDUSTRY_DELAY};

/// GET /api/v1/insights — lazy get-or-refresh for the caller's industry.
pub async fn handle_get_insights(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<IndustryInsightRow>, AppError> {
    let user = resolve_current_user(&state.db, &headers).await?;
    let industry = user
        .industry
        .filter(|i| !i.trim().is_empty())
        .ok_or_else(|| {
            AppError::InvalidInput("Set an industry on your profile first".to_string())
        })?;

    let row = super::get_or_refresh(&*state.insights, &*state.llm, DEFAULT_RETRY, &industry).await?;
    Ok(Json(row))
}

/// POST /api/v1/insights/refresh — explicit synchronous refresh.
/// Unlike the lazy getter, a failure here propagates to the caller.
pub async fn handle_refresh_insights(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<IndustryInsightRow>, AppError> {
    let user = resolve_current_user(&state.db, &headers).await?;
    let industry = user
        .industry
        .filter(|i| !i.trim().is_empty())
        .ok_or_else(|| {
            AppError::InvalidInput("Set an industry on your profile first".to_string())
        })?;

    let row =
        super::refresh_industry(&*state.insights, &*state.llm, DEFAULT_RETRY, &industry).await?;
    Ok(Json(row))
}

/// POST /internal/jobs/insights/refresh — the weekly cron trigger.
pub async fn handle_batch_refresh(
    State(state): State<AppState>,
) -> Result<Json<BatchRunReport>, AppError> {
    let steps = StepRunner::new();
    let report = batch::refresh_all(
        &*state.insights,
        &*state.llm,
        &steps,
        DEFAULT_RETRY,
        INTER_INDUSTRY_DELAY,
    )
    .await?;
    Ok(Json(report))
}

/// POST /internal/jobs/insights/refresh/:industry — manual single-industry
/// trigger, same generate+persist path as the weekly run, no loop or delay.
pub async fn handle_refresh_single(
    State(state): State<AppState>,
    Path(industry): Path<String>,
) -> Result<Json<IndustryInsightRow>, AppError> {
    if industry.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "industry must not be blank".to_string(),
        ));
    }
    let steps = StepRunner::new();
    let row = batch::refresh_one(
        &*state.insights,
        &*state.llm,
        &steps,
        DEFAULT_RETRY,
        &industry,
    )
    .await?;
    Ok(Json(row))
}
