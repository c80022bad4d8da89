use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The user's single resume document (one row per user).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One AI rewrite of a resume section. Persisted so the hourly rewrite quota
/// has a count source.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRewriteRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub section: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
