//! Cover letter generation and CRUD.
//!
//! Flow: quota check → LLM generate through the retry executor (prose
//! validated per attempt) → persist. List/get/delete are thin row plumbing.

pub mod handlers;
pub mod prompts;

use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::artifact::{self, schema};
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::models::cover_letter::CoverLetterRow;
use crate::models::user::User;
use crate::quota;
use crate::retry::{self, RetryPolicy};
use crate::store::QuotaCounter;

#[derive(Debug, Clone, Deserialize)]
pub struct CoverLetterRequest {
    pub job_title: String,
    pub company_name: String,
    pub job_description: String,
}

impl CoverLetterRequest {
    fn validate(&self) -> Result<(), AppError> {
        let fields = [
            ("job_title", &self.job_title),
            ("company_name", &self.company_name),
            ("job_description", &self.job_description),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(AppError::InvalidInput(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Generates the letter text; one retryable attempt = generate → strip
/// fences → prose check. No persistence here.
pub(crate) async fn compose_cover_letter(
    generator: &dyn TextGenerator,
    retry_policy: RetryPolicy,
    user: &User,
    request: &CoverLetterRequest,
) -> Result<String, AppError> {
    let prompt = prompts::build_cover_letter_prompt(user, request);
    let prompt = prompt.as_str();

    retry::execute(retry_policy, "cover letter", move || async move {
        let raw = generator
            .generate(prompt, prompts::COVER_LETTER_SYSTEM)
            .await?;
        let text = artifact::strip_code_fences(&raw).to_string();
        schema::validate_prose("cover letter", &text)?;
        Ok(text)
    })
    .await
}

pub async fn generate_cover_letter(
    pool: &PgPool,
    counter: &dyn QuotaCounter,
    generator: &dyn TextGenerator,
    retry_policy: RetryPolicy,
    user: &User,
    request: CoverLetterRequest,
) -> Result<CoverLetterRow, AppError> {
    request.validate()?;
    quota::check_quota(counter, user.id, &quota::COVER_LETTERS).await?;

    let content = compose_cover_letter(generator, retry_policy, user, &request).await?;

    let row = sqlx::query_as::<_, CoverLetterRow>(
        r#"
        INSERT INTO cover_letters
            (id, user_id, content, job_title, company_name, job_description, status)
        VALUES ($1, $2, $3, $4, $5, $6, 'completed')
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(&content)
    .bind(request.job_title.trim())
    .bind(request.company_name.trim())
    .bind(&request.job_description)
    .fetch_one(pool)
    .await?;

    info!("Generated cover letter {} for user {}", row.id, user.id);
    Ok(row)
}

pub async fn list_cover_letters(
    pool: &PgPool,
    user: &User,
) -> Result<Vec<CoverLetterRow>, AppError> {
    let rows = sqlx::query_as::<_, CoverLetterRow>(
        "SELECT * FROM cover_letters WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user.id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get_cover_letter(
    pool: &PgPool,
    user: &User,
    id: Uuid,
) -> Result<CoverLetterRow, AppError> {
    let row = sqlx::query_as::<_, CoverLetterRow>(
        "SELECT * FROM cover_letters WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user.id)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| AppError::NotFound(format!("Cover letter {id} not found")))
}

/// Deleting an already-absent letter is a no-op success by convention.
pub async fn delete_cover_letter(pool: &PgPool, user: &User, id: Uuid) -> Result<(), AppError> {
    sqlx::query("DELETE FROM cover_letters WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.id)
        .execute(pool)
        .await?;
    Ok(())
}
