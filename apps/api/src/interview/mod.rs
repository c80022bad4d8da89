//! Interview prep: quiz generation and assessment history.
//!
//! Quiz generation is quota-checked and schema-validated (10 questions,
//! 4 options each). Saving a result computes the score server-side and,
//! when there are wrong answers, asks the LLM for one improvement tip —
//! best-effort: a tip failure never loses the result.

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::artifact::types::QuizPayload;
use crate::artifact::{self, schema};
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::models::assessment::AssessmentRow;
use crate::models::user::User;
use crate::quota;
use crate::retry::{self, RetryPolicy};
use crate::store::QuotaCounter;

/// One quiz question together with the user's answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredQuestion {
    pub question: String,
    pub correct_answer: String,
    pub user_answer: String,
    pub explanation: String,
}

impl AnsweredQuestion {
    pub fn is_correct(&self) -> bool {
        self.user_answer == self.correct_answer
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveResultRequest {
    pub questions: Vec<AnsweredQuestion>,
    pub category: String,
}

/// Percentage of correctly answered questions.
pub(crate) fn score_for(questions: &[AnsweredQuestion]) -> f64 {
    let correct = questions.iter().filter(|q| q.is_correct()).count();
    correct as f64 / questions.len() as f64 * 100.0
}

fn wrong_answers_text(questions: &[AnsweredQuestion]) -> String {
    questions
        .iter()
        .filter(|q| !q.is_correct())
        .map(|q| {
            format!(
                "Question: \"{}\"\nCorrect answer: \"{}\"\nUser's answer: \"{}\"",
                q.question, q.correct_answer, q.user_answer
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Generates a validated 10-question quiz for the user's industry and
/// skills. The quiz itself is not persisted; the assessment is, on save.
pub async fn generate_quiz(
    counter: &dyn QuotaCounter,
    generator: &dyn TextGenerator,
    retry_policy: RetryPolicy,
    user: &User,
) -> Result<QuizPayload, AppError> {
    let industry = user
        .industry
        .as_deref()
        .filter(|i| !i.trim().is_empty())
        .ok_or_else(|| {
            AppError::InvalidInput("Set an industry on your profile first".to_string())
        })?;

    quota::check_quota(counter, user.id, &quota::QUIZZES).await?;

    let prompt = prompts::build_quiz_prompt(industry, &user.skills);
    let prompt = prompt.as_str();

    retry::execute(retry_policy, "interview quiz", move || async move {
        let raw = generator.generate(prompt, prompts::QUIZ_SYSTEM).await?;
        let text = artifact::strip_code_fences(&raw);
        let quiz: QuizPayload = artifact::parse_payload("interview quiz", text)?;
        schema::validate_quiz(&quiz)?;
        Ok(quiz)
    })
    .await
}

/// Best-effort improvement tip from the wrong answers.
pub(crate) async fn generate_improvement_tip(
    generator: &dyn TextGenerator,
    retry_policy: RetryPolicy,
    industry: &str,
    wrong_answers: &str,
) -> Result<String, AppError> {
    let prompt = prompts::build_tip_prompt(industry, wrong_answers);
    let prompt = prompt.as_str();

    retry::execute(retry_policy, "improvement tip", move || async move {
        let raw = generator.generate(prompt, prompts::TIP_SYSTEM).await?;
        let text = artifact::strip_code_fences(&raw).to_string();
        schema::validate_prose("improvement tip", &text)?;
        Ok(text)
    })
    .await
}

pub async fn save_quiz_result(
    pool: &PgPool,
    generator: &dyn TextGenerator,
    retry_policy: RetryPolicy,
    user: &User,
    request: SaveResultRequest,
) -> Result<AssessmentRow, AppError> {
    if request.questions.is_empty() {
        return Err(AppError::InvalidInput(
            "questions must not be empty".to_string(),
        ));
    }
    if request.category.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "category must not be empty".to_string(),
        ));
    }

    let quiz_score = score_for(&request.questions);
    let wrong = wrong_answers_text(&request.questions);

    let improvement_tip = if wrong.is_empty() {
        None
    } else {
        let industry = user.industry.as_deref().unwrap_or("unspecified");
        match generate_improvement_tip(generator, retry_policy, industry, &wrong).await {
            Ok(tip) => Some(tip),
            Err(e) => {
                warn!("Improvement tip generation failed, saving result without it: {e}");
                None
            }
        }
    };

    let questions = serde_json::to_value(&request.questions)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize questions: {e}")))?;

    let row = sqlx::query_as::<_, AssessmentRow>(
        r#"
        INSERT INTO assessments
            (id, user_id, quiz_score, questions, category, improvement_tip)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(quiz_score)
    .bind(questions)
    .bind(request.category.trim())
    .bind(&improvement_tip)
    .fetch_one(pool)
    .await?;

    info!(
        "Saved assessment {} for user {} (score {quiz_score:.0})",
        row.id, user.id
    );
    Ok(row)
}

pub async fn list_assessments(pool: &PgPool, user: &User) -> Result<Vec<AssessmentRow>, AppError> {
    let rows = sqlx::query_as::<_, AssessmentRow>(
        "SELECT * FROM assessments WHERE user_id = $1 ORDER BY created_at ASC",
    )
    .bind(user.id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
