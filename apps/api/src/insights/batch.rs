//! Weekly batch refresh over every cached industry.
//!
//! Strictly sequential with a fixed pause between items — a throughput
//! throttle against the generation provider's rate limits, not a concurrency
//! ceiling to optimize away. One industry failing never aborts the run; it
//! is recorded in the run report and the loop moves on.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::models::insight::IndustryInsightRow;
use crate::retry::RetryPolicy;
use crate::store::{InsightRecord, InsightStore};
use crate::workflow::StepRunner;

/// Pause between industries.
pub const INTER_INDUSTRY_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub industry: String,
    pub error: String,
    pub at: DateTime<Utc>,
}

/// Outcome of one scheduled run. Returned to the trigger and logged; not
/// persisted anywhere beyond that.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRunReport {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
    pub failures: Vec<BatchFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Refreshes every distinct cached industry, sequentially, isolating
/// per-industry failures into the run report.
pub async fn refresh_all(
    store: &dyn InsightStore,
    generator: &dyn TextGenerator,
    steps: &StepRunner,
    retry: RetryPolicy,
    inter_item_delay: Duration,
) -> Result<BatchRunReport, AppError> {
    let started_at = Utc::now();

    let enumerated = steps
        .run_step("enumerate-industries", || store.industries())
        .await?;
    let total = enumerated.len();
    let (industries, blank): (Vec<String>, Vec<String>) = enumerated
        .into_iter()
        .partition(|industry| !industry.trim().is_empty());
    let skipped = blank.len();

    info!(
        "Insight batch refresh started: {} industries, {skipped} skipped",
        industries.len()
    );

    let mut successful = 0usize;
    let mut failures: Vec<BatchFailure> = Vec::new();
    let last = industries.len().saturating_sub(1);

    for (i, industry) in industries.iter().enumerate() {
        match refresh_one(store, generator, steps, retry, industry).await {
            Ok(_) => successful += 1,
            Err(e) => {
                warn!("Batch refresh for '{industry}' failed: {e}");
                failures.push(BatchFailure {
                    industry: industry.clone(),
                    error: e.to_string(),
                    at: Utc::now(),
                });
            }
        }

        if i < last {
            steps
                .sleep(&format!("pause-after-{industry}"), inter_item_delay)
                .await;
        }
    }

    let report = BatchRunReport {
        total,
        successful,
        failed: failures.len(),
        skipped,
        failures,
        started_at,
        finished_at: Utc::now(),
    };
    info!(
        "Insight batch refresh finished: {}/{} successful, {} failed, {} skipped",
        report.successful, report.total, report.failed, report.skipped
    );
    Ok(report)
}

/// Generate-then-persist for a single industry, decomposed into two steps so
/// a resumed run re-does at most one generation. The manual trigger calls
/// this directly; the weekly run calls it per enumerated industry.
pub async fn refresh_one(
    store: &dyn InsightStore,
    generator: &dyn TextGenerator,
    steps: &StepRunner,
    retry: RetryPolicy,
    industry: &str,
) -> Result<IndustryInsightRow, AppError> {
    let payload = steps
        .run_step(&format!("generate-{industry}"), || {
            super::generate_insight(generator, retry, industry)
        })
        .await?;

    steps
        .run_step(&format!("persist-{industry}"), move || async move {
            let now = Utc::now();
            store
                .upsert(
                    industry,
                    &InsightRecord {
                        payload,
                        last_updated: now,
                        next_update: now + super::freshness_window(),
                    },
                )
                .await
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::fixtures::insight_json;
    use crate::llm_client::mock::ScriptedGenerator;
    use crate::llm_client::{LlmError, TextGenerator};
    use crate::store::memory::MemoryInsightStore;
    use async_trait::async_trait;
    use chrono::Duration as ChronoDuration;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    fn fast_retry(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_delay: Duration::from_millis(10),
        }
    }

    fn seeded_row(industry: &str) -> IndustryInsightRow {
        let last_updated = Utc::now() - ChronoDuration::days(8);
        IndustryInsightRow {
            id: Uuid::new_v4(),
            industry: industry.to_string(),
            salary_ranges: serde_json::json!([]),
            growth_rate: 0.0,
            demand_level: "MEDIUM".to_string(),
            top_skills: vec![],
            market_outlook: "NEUTRAL".to_string(),
            key_trends: vec![],
            recommended_skills: vec![],
            last_updated,
            next_update: last_updated + ChronoDuration::days(7),
        }
    }

    /// Fails every call whose prompt mentions `poison`; succeeds otherwise.
    struct PoisonedGenerator {
        poison: &'static str,
        reply: String,
        calls: AtomicUsize,
    }

    impl PoisonedGenerator {
        fn new(poison: &'static str) -> Self {
            Self {
                poison,
                reply: insight_json(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for PoisonedGenerator {
        async fn generate(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if prompt.contains(self.poison) {
                Err(LlmError::Api {
                    status: 500,
                    message: "provider rejected the request".to_string(),
                })
            } else {
                Ok(self.reply.clone())
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_failing_industry_does_not_abort_the_run() {
        let store = MemoryInsightStore::new();
        store.seed(seeded_row("Aerospace"));
        store.seed(seeded_row("Biotech"));
        store.seed(seeded_row("Construction"));
        let generator = PoisonedGenerator::new("Biotech");
        let steps = StepRunner::new();

        let report = refresh_all(
            &store,
            &generator,
            &steps,
            fast_retry(1),
            Duration::from_secs(5),
        )
        .await
        .unwrap();

        assert_eq!(report.total, 3);
        assert_eq!(report.successful, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].industry, "Biotech");
        assert!(report.failures[0].error.contains("2 attempts"));

        // the third industry was processed despite the second failing
        assert_eq!(store.get("Construction").unwrap().demand_level, "HIGH");
        // the failed one keeps its old record
        assert_eq!(store.get("Biotech").unwrap().demand_level, "MEDIUM");
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_industries_are_skipped_not_generated() {
        let store = MemoryInsightStore::new();
        store.seed(seeded_row("  "));
        store.seed(seeded_row("Aerospace"));
        let generator = ScriptedGenerator::always_ok(&insight_json());
        let steps = StepRunner::new();

        let report = refresh_all(
            &store,
            &generator,
            &steps,
            fast_retry(0),
            Duration::from_secs(5),
        )
        .await
        .unwrap();

        assert_eq!(report.total, 2);
        assert_eq!(report.successful, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_inter_item_delay_applies_between_but_not_after_items() {
        let store = MemoryInsightStore::new();
        store.seed(seeded_row("Aerospace"));
        store.seed(seeded_row("Biotech"));
        store.seed(seeded_row("Construction"));
        let generator = ScriptedGenerator::always_ok(&insight_json());
        let steps = StepRunner::new();

        let start = tokio::time::Instant::now();
        refresh_all(
            &store,
            &generator,
            &steps,
            fast_retry(0),
            Duration::from_secs(5),
        )
        .await
        .unwrap();

        // 3 items → exactly 2 pauses; generation itself takes no mock time
        assert_eq!(start.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_store_produces_empty_report() {
        let store = MemoryInsightStore::new();
        let generator = ScriptedGenerator::always_ok(&insight_json());
        let steps = StepRunner::new();

        let report = refresh_all(
            &store,
            &generator,
            &steps,
            fast_retry(0),
            INTER_INDUSTRY_DELAY,
        )
        .await
        .unwrap();

        assert_eq!(report.total, 0);
        assert_eq!(report.successful, 0);
        assert_eq!(report.failed, 0);
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_single_industry_refresh_persists_new_fields() {
        let store = MemoryInsightStore::new();
        store.seed(seeded_row("Aerospace"));
        let generator = ScriptedGenerator::always_ok(&insight_json());
        let steps = StepRunner::new();

        let row = refresh_one(&store, &generator, &steps, fast_retry(0), "Aerospace")
            .await
            .unwrap();

        assert_eq!(generator.calls(), 1);
        assert_eq!(row.demand_level, "HIGH");
        assert_eq!(row.next_update, row.last_updated + ChronoDuration::days(7));
    }
}
