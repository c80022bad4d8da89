//! Trailing-window rate limiting for AI-backed operations.
//!
//! No reservation or locking: the check reads a count and acts on it, so two
//! concurrent requests from the same user can both pass before either's
//! artifact lands, overshooting by the degree of concurrency. Soft per-user
//! quotas tolerate that; the stronger variant is an atomic
//! increment-and-check against the counting store.

use chrono::{Duration, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::store::{CountedArtifact, QuotaCounter};

/// One operation's quota: at most `max` artifacts per trailing window.
#[derive(Debug, Clone, Copy)]
pub struct QuotaPolicy {
    pub artifact: CountedArtifact,
    pub what: &'static str,
    pub window: &'static str,
    pub window_secs: i64,
    pub max: i64,
}

pub const COVER_LETTERS: QuotaPolicy = QuotaPolicy {
    artifact: CountedArtifact::CoverLetters,
    what: "cover letters",
    window: "24 hours",
    window_secs: 86_400,
    max: 10,
};

pub const QUIZZES: QuotaPolicy = QuotaPolicy {
    artifact: CountedArtifact::Assessments,
    what: "quizzes",
    window: "24 hours",
    window_secs: 86_400,
    max: 5,
};

pub const RESUME_REWRITES: QuotaPolicy = QuotaPolicy {
    artifact: CountedArtifact::ResumeRewrites,
    what: "resume improvements",
    window: "hour",
    window_secs: 3_600,
    max: 20,
};

/// Fails with `QuotaExceeded` when the subject already has `max` or more
/// artifacts created inside the trailing window (inclusive lower bound).
pub async fn check_quota(
    counter: &dyn QuotaCounter,
    user_id: Uuid,
    policy: &QuotaPolicy,
) -> Result<(), AppError> {
    let since = Utc::now() - Duration::seconds(policy.window_secs);
    let observed = counter.count_since(user_id, policy.artifact, since).await?;

    if observed >= policy.max {
        return Err(AppError::QuotaExceeded {
            max: policy.max,
            what: policy.what,
            window: policy.window,
        });
    }

    debug!(
        "quota ok for {user_id}: {observed}/{} {} in the last {}",
        policy.max, policy.what, policy.window
    );
    Ok(())
}
