//! Durable-step decomposition seam for scheduled jobs.
//!
//! The crash-resume guarantee (re-run from the first incomplete step,
//! completed steps observed exactly once) belongs to the workflow engine
//! fronting the deployment. This side only has to cut a job into labeled,
//! idempotent steps and route every suspension through `sleep`.

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct StepRunner;

impl StepRunner {
    pub fn new() -> Self {
        Self
    }

    /// Runs one labeled unit of work. Re-running a completed step must be
    /// safe; every step the batch job registers is a pure read or a
    /// whole-record overwrite.
    pub async fn run_step<T, E, F, Fut>(&self, label: &str, step: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        info!(step = label, "step started");
        let result = step().await;
        match &result {
            Ok(_) => info!(step = label, "step completed"),
            Err(e) => warn!(step = label, "step failed: {e}"),
        }
        result
    }

    /// Labeled suspension point between units of work.
    pub async fn sleep(&self, label: &str, duration: Duration) {
        info!(step = label, "sleeping for {}ms", duration.as_millis());
        tokio::time::sleep(duration).await;
    }
}
