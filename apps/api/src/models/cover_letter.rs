use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CoverLetterRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub job_title: String,
    pub company_name: String,
    pub job_description: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
