//! Profile updates.
//!
//! Setting a new industry bootstraps that industry's shared insight record
//! lazily. That refresh is best-effort by design: onboarding must never
//! block on AI availability, so any failure is logged and swallowed.

use axum::{extract::State, http::HeaderMap, Json};
use serde::Deserialize;
use tracing::warn;

use crate::auth::resolve_current_user;
use crate::errors::AppError;
use crate::models::user::User;
use crate::retry::DEFAULT_RETRY;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub industry: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience_years: Option<i32>,
    pub bio: Option<String>,
}

/// PATCH /api/v1/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<User>, AppError> {
    let user = resolve_current_user(&state.db, &headers).await?;

    if let Some(industry) = &req.industry {
        if industry.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "industry must not be blank".to_string(),
            ));
        }
    }

    let updated = sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET
            industry = COALESCE($1, industry),
            skills = COALESCE($2, skills),
            experience_years = COALESCE($3, experience_years),
            bio = COALESCE($4, bio)
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(&req.industry)
    .bind(&req.skills)
    .bind(req.experience_years)
    .bind(&req.bio)
    .bind(user.id)
    .fetch_one(&state.db)
    .await?;

    if let Some(industry) = updated.industry.as_deref().filter(|i| !i.trim().is_empty()) {
        if user.industry.as_deref() != Some(industry) {
            if let Err(e) = crate::insights::get_or_refresh(
                &*state.insights,
                &*state.llm,
                DEFAULT_RETRY,
                industry,
            )
            .await
            {
                warn!("Insight bootstrap for '{industry}' failed during profile update: {e}");
            }
        }
    }

    Ok(Json(updated))
}
