use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user record. `external_id` is the stable subject id issued by the
/// upstream auth provider; `industry` links the profile to a shared
/// `industry_insights` record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub external_id: String,
    pub email: String,
    pub industry: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: Option<i32>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}
