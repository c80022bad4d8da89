//! Resume storage, AI section rewriting, and structured critique.
//!
//! Each user has one resume document, upserted wholesale. Rewrites are
//! persisted individually — they are the count source for the hourly
//! rewrite quota.

pub mod handlers;
pub mod prompts;

use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::artifact::types::ResumeAnalysisPayload;
use crate::artifact::{self, schema};
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::models::resume::{ResumeRewriteRow, ResumeRow};
use crate::models::user::User;
use crate::quota;
use crate::retry::{self, RetryPolicy};
use crate::store::QuotaCounter;

#[derive(Debug, Clone, Deserialize)]
pub struct ImproveRequest {
    pub section: String,
    pub current_content: String,
}

pub async fn save_resume(
    pool: &PgPool,
    user: &User,
    content: &str,
) -> Result<ResumeRow, AppError> {
    if content.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "resume content must not be empty".to_string(),
        ));
    }

    let row = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (id, user_id, content)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id) DO UPDATE SET
            content = EXCLUDED.content,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    info!("Saved resume for user {}", user.id);
    Ok(row)
}

pub async fn get_resume(pool: &PgPool, user: &User) -> Result<ResumeRow, AppError> {
    let row = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE user_id = $1")
        .bind(user.id)
        .fetch_optional(pool)
        .await?;
    row.ok_or_else(|| AppError::NotFound("No resume on file".to_string()))
}

/// Rewrites one section; one retryable attempt = generate → strip fences →
/// prose check. No persistence here.
pub(crate) async fn rewrite_section(
    generator: &dyn TextGenerator,
    retry_policy: RetryPolicy,
    user: &User,
    request: &ImproveRequest,
) -> Result<String, AppError> {
    let industry = user.industry.as_deref().unwrap_or("unspecified");
    let prompt = prompts::build_improve_prompt(&request.section, industry, &request.current_content);
    let prompt = prompt.as_str();

    retry::execute(retry_policy, "resume section rewrite", move || async move {
        let raw = generator.generate(prompt, prompts::IMPROVE_SYSTEM).await?;
        let text = artifact::strip_code_fences(&raw).to_string();
        schema::validate_prose("resume section", &text)?;
        Ok(text)
    })
    .await
}

pub async fn improve_section(
    pool: &PgPool,
    counter: &dyn QuotaCounter,
    generator: &dyn TextGenerator,
    retry_policy: RetryPolicy,
    user: &User,
    request: ImproveRequest,
) -> Result<ResumeRewriteRow, AppError> {
    if request.section.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "section must not be empty".to_string(),
        ));
    }
    if request.current_content.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "current_content must not be empty".to_string(),
        ));
    }

    quota::check_quota(counter, user.id, &quota::RESUME_REWRITES).await?;

    let content = rewrite_section(generator, retry_policy, user, &request).await?;

    let row = sqlx::query_as::<_, ResumeRewriteRow>(
        r#"
        INSERT INTO resume_rewrites (id, user_id, section, content)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(request.section.trim())
    .bind(&content)
    .fetch_one(pool)
    .await?;

    info!("Rewrote {} section for user {}", row.section, user.id);
    Ok(row)
}

/// Structured critique of the stored resume. Shares the rewrite quota
/// window but does not add to its count (analyses persist nothing).
pub async fn analyze_resume(
    pool: &PgPool,
    counter: &dyn QuotaCounter,
    generator: &dyn TextGenerator,
    retry_policy: RetryPolicy,
    user: &User,
) -> Result<ResumeAnalysisPayload, AppError> {
    let resume = get_resume(pool, user).await?;
    quota::check_quota(counter, user.id, &quota::RESUME_REWRITES).await?;

    let industry = user.industry.as_deref().unwrap_or("unspecified");
    let prompt = prompts::build_analyze_prompt(industry, &resume.content);
    let prompt = prompt.as_str();

    retry::execute(retry_policy, "resume analysis", move || async move {
        let raw = generator.generate(prompt, prompts::ANALYZE_SYSTEM).await?;
        let text = artifact::strip_code_fences(&raw);
        let analysis: ResumeAnalysisPayload = artifact::parse_payload("resume analysis", text)?;
        schema::validate_resume_analysis(&analysis)?;
        Ok(analysis)
    })
    .await
}
