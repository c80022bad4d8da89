use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Cached market report for one industry, shared by every user whose profile
/// names that industry. Refreshed wholesale; `next_update` is always
/// `last_updated + 7 days`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IndustryInsightRow {
    pub id: Uuid,
    pub industry: String,
    /// Salary bands as JSONB, in the same shape the LLM produces.
    pub salary_ranges: serde_json::Value,
    pub growth_rate: f64,
    pub demand_level: String,
    pub top_skills: Vec<String>,
    pub market_outlook: String,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
    pub last_updated: DateTime<Utc>,
    pub next_update: DateTime<Utc>,
}

impl IndustryInsightRow {
    /// A record is stale once `now` has passed its scheduled refresh time.
    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        now > self.next_update
    }
}
