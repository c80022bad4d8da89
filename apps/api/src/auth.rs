//! Identity resolution.
//!
//! Token verification happens upstream at the auth gateway, which injects
//! the provider's stable subject id into a trusted header. This side only
//! maps that subject to a `users` row.

use axum::http::HeaderMap;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::user::User;

/// Header carrying the verified auth-provider subject id.
pub const AUTH_SUBJECT_HEADER: &str = "x-auth-subject";

pub(crate) fn subject_from_headers(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(AUTH_SUBJECT_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(AppError::Unauthenticated)
}

/// Resolves the calling user or fails: `Unauthenticated` when the gateway
/// header is missing, `NotFound` when no account exists for the subject.
pub async fn resolve_current_user(pool: &PgPool, headers: &HeaderMap) -> Result<User, AppError> {
    let subject = subject_from_headers(headers)?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE external_id = $1")
        .bind(subject)
        .fetch_optional(pool)
        .await?;

    user.ok_or_else(|| AppError::NotFound(format!("No account for subject '{subject}'")))
}
