//! Record-store collaborators behind trait seams.
//!
//! The insight cache manager, batch scheduler, and rate limiter only ever see
//! these traits (carried in `AppState` as trait objects, like the pluggable
//! scorer seam this codebase uses for the LLM client). Production backs them
//! with Postgres; tests back them with the in-memory doubles at the bottom of
//! this file.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::artifact::types::InsightPayload;
use crate::errors::AppError;
use crate::models::insight::IndustryInsightRow;

/// What gets written on every insight upsert: the full field set, wholesale.
///
/// INVARIANT: there is no partial-field write path. Concurrent refreshes of
/// the same industry resolve last-writer-wins on the whole record, so readers
/// never observe a torn mix of two generations.
#[derive(Debug, Clone)]
pub struct InsightRecord {
    pub payload: InsightPayload,
    pub last_updated: DateTime<Utc>,
    pub next_update: DateTime<Utc>,
}

#[async_trait]
pub trait InsightStore: Send + Sync {
    /// Distinct industry keys currently cached, blank ones included — the
    /// batch job counts those as skipped rather than filtering them here.
    async fn industries(&self) -> Result<Vec<String>, AppError>;

    async fn find(&self, industry: &str) -> Result<Option<IndustryInsightRow>, AppError>;

    /// Whole-record overwrite keyed by `industry`; creates on first write.
    /// Idempotent: repeating the same write yields the same stored state.
    async fn upsert(
        &self,
        industry: &str,
        record: &InsightRecord,
    ) -> Result<IndustryInsightRow, AppError>;
}

/// Artifact collections a quota window can count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountedArtifact {
    CoverLetters,
    Assessments,
    ResumeRewrites,
}

#[async_trait]
pub trait QuotaCounter: Send + Sync {
    /// Number of the subject's artifacts created at or after `since`.
    async fn count_since(
        &self,
        user_id: Uuid,
        artifact: CountedArtifact,
        since: DateTime<Utc>,
    ) -> Result<i64, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Postgres implementations
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InsightStore for PgStore {
    async fn industries(&self) -> Result<Vec<String>, AppError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT industry FROM industry_insights ORDER BY industry")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(|(industry,)| industry).collect())
    }

    async fn find(&self, industry: &str) -> Result<Option<IndustryInsightRow>, AppError> {
        let row = sqlx::query_as::<_, IndustryInsightRow>(
            "SELECT * FROM industry_insights WHERE industry = $1",
        )
        .bind(industry)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn upsert(
        &self,
        industry: &str,
        record: &InsightRecord,
    ) -> Result<IndustryInsightRow, AppError> {
        let salary_ranges = serde_json::to_value(&record.payload.salary_ranges)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize salary ranges: {e}")))?;

        let row = sqlx::query_as::<_, IndustryInsightRow>(
            r#"
            INSERT INTO industry_insights
                (id, industry, salary_ranges, growth_rate, demand_level, top_skills,
                 market_outlook, key_trends, recommended_skills, last_updated, next_update)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (industry) DO UPDATE SET
                salary_ranges = EXCLUDED.salary_ranges,
                growth_rate = EXCLUDED.growth_rate,
                demand_level = EXCLUDED.demand_level,
                top_skills = EXCLUDED.top_skills,
                market_outlook = EXCLUDED.market_outlook,
                key_trends = EXCLUDED.key_trends,
                recommended_skills = EXCLUDED.recommended_skills,
                last_updated = EXCLUDED.last_updated,
                next_update = EXCLUDED.next_update
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(industry)
        .bind(salary_ranges)
        .bind(record.payload.growth_rate)
        .bind(&record.payload.demand_level)
        .bind(&record.payload.top_skills)
        .bind(&record.payload.market_outlook)
        .bind(&record.payload.key_trends)
        .bind(&record.payload.recommended_skills)
        .bind(record.last_updated)
        .bind(record.next_update)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}

#[async_trait]
impl QuotaCounter for PgStore {
    async fn count_since(
        &self,
        user_id: Uuid,
        artifact: CountedArtifact,
        since: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        let sql = match artifact {
            CountedArtifact::CoverLetters => {
                "SELECT COUNT(*) FROM cover_letters WHERE user_id = $1 AND created_at >= $2"
            }
            CountedArtifact::Assessments => {
                "SELECT COUNT(*) FROM assessments WHERE user_id = $1 AND created_at >= $2"
            }
            CountedArtifact::ResumeRewrites => {
                "SELECT COUNT(*) FROM resume_rewrites WHERE user_id = $1 AND created_at >= $2"
            }
        };

        let count: i64 = sqlx::query_scalar(sql)
            .bind(user_id)
            .bind(since)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory doubles for tests
// ────────────────────────────────────────────────────────────────────────────
