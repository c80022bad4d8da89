//! Bounded retry around AI generation attempts.
//!
//! One "attempt" is the whole generate → sanitize → decode → validate chain;
//! callers hand it in as a closure. Transport faults and malformed output are
//! retried uniformly. The two kinds stay distinguishable on
//! [`GenerationError`] so a future "don't retry malformed output" policy is a
//! one-line change here rather than a rewrite at every call site.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

use crate::artifact::MalformedArtifact;
use crate::errors::AppError;
use crate::llm_client::LlmError;

/// Why a single attempt failed.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("transport: {0}")]
    Transport(#[from] LlmError),

    #[error(transparent)]
    Malformed(#[from] MalformedArtifact),
}

/// Retry bounds for an AI-backed operation.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Additional attempts after the first; total attempts = `max_retries + 1`.
    pub max_retries: u32,
    /// The wait after failed attempt n (1-indexed) is `base_delay * n`.
    /// No wait follows the final attempt.
    pub base_delay: Duration,
}

pub const DEFAULT_RETRY: RetryPolicy = RetryPolicy {
    max_retries: 2,
    base_delay: Duration::from_secs(1),
};

impl Default for RetryPolicy {
    fn default() -> Self {
        DEFAULT_RETRY
    }
}

/// Runs `attempt` up to `policy.max_retries + 1` times, sleeping
/// `base_delay × attempt_number` between attempts. Exhaustion surfaces as
/// [`AppError::GenerationUnavailable`] wrapping the last failure's message.
pub async fn execute<T, F, Fut>(
    policy: RetryPolicy,
    label: &str,
    mut attempt: F,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GenerationError>>,
{
    let attempts = policy.max_retries + 1;
    let mut last_error: Option<GenerationError> = None;

    for n in 1..=attempts {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                warn!("{label}: attempt {n}/{attempts} failed: {e}");
                last_error = Some(e);
                if n < attempts {
                    tokio::time::sleep(policy.base_delay * n).await;
                }
            }
        }
    }

    let detail = last_error
        .map(|e| e.to_string())
        .unwrap_or_else(|| "no attempts were made".to_string());
    Err(AppError::GenerationUnavailable(format!(
        "{label} failed after {attempts} attempts: {detail}"
    )))
}
