//! Industry insight cache manager.
//!
//! One record per industry, shared by every user in that industry. Three
//! effective states on read: FRESH (serve the cache, no generation call),
//! STALE (synchronous regenerate, failure propagates), and ABSENT (write a
//! neutral placeholder, then refresh best-effort — a brand-new profile must
//! never block on AI availability, so that one failure is swallowed).

pub mod batch;
pub mod handlers;
pub mod prompts;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::artifact::types::InsightPayload;
use crate::artifact::{self, schema};
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::models::insight::IndustryInsightRow;
use crate::retry::{self, RetryPolicy};
use crate::store::{InsightRecord, InsightStore};

/// Cached reports go stale after this long; `next_update` is always
/// `last_updated` plus this window.
pub const STALENESS_WINDOW_DAYS: i64 = 7;

pub(crate) fn freshness_window() -> Duration {
    Duration::days(STALENESS_WINDOW_DAYS)
}

/// Neutral placeholder written on first access for an industry.
fn placeholder_record(now: DateTime<Utc>) -> InsightRecord {
    InsightRecord {
        payload: InsightPayload {
            salary_ranges: vec![],
            growth_rate: 0.0,
            demand_level: "MEDIUM".to_string(),
            top_skills: vec![],
            market_outlook: "NEUTRAL".to_string(),
            key_trends: vec![],
            recommended_skills: vec![],
        },
        last_updated: now,
        next_update: now + freshness_window(),
    }
}

/// Produces one validated market report through the retry executor.
/// One attempt = generate → strip fences → decode → schema-check.
pub(crate) async fn generate_insight(
    generator: &dyn TextGenerator,
    retry: RetryPolicy,
    industry: &str,
) -> Result<InsightPayload, AppError> {
    let prompt = prompts::build_insight_prompt(industry);
    let prompt = prompt.as_str();

    retry::execute(
        retry,
        &format!("industry insight for '{industry}'"),
        move || async move {
            let raw = generator.generate(prompt, prompts::INSIGHT_SYSTEM).await?;
            let text = artifact::strip_code_fences(&raw);
            let payload: InsightPayload = artifact::parse_payload("industry insight", text)?;
            schema::validate_industry_insight(&payload)?;
            Ok(payload)
        },
    )
    .await
}

/// Synchronous full refresh: regenerate and overwrite the whole record,
/// advancing the freshness window. Failures propagate — an explicit refresh
/// must not silently leave stale data in place.
pub async fn refresh_industry(
    store: &dyn InsightStore,
    generator: &dyn TextGenerator,
    retry: RetryPolicy,
    industry: &str,
) -> Result<IndustryInsightRow, AppError> {
    let payload = generate_insight(generator, retry, industry).await?;
    let now = Utc::now();
    let row = store
        .upsert(
            industry,
            &InsightRecord {
                payload,
                last_updated: now,
                next_update: now + freshness_window(),
            },
        )
        .await?;
    info!("Refreshed industry insights for '{industry}'");
    Ok(row)
}

/// Lazy read path used by profile and dashboard flows.
pub async fn get_or_refresh(
    store: &dyn InsightStore,
    generator: &dyn TextGenerator,
    retry: RetryPolicy,
    industry: &str,
) -> Result<IndustryInsightRow, AppError> {
    if industry.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "industry must not be blank".to_string(),
        ));
    }

    match store.find(industry).await? {
        None => {
            let placeholder = store
                .upsert(industry, &placeholder_record(Utc::now()))
                .await?;
            match refresh_industry(store, generator, retry, industry).await {
                Ok(row) => Ok(row),
                Err(AppError::GenerationUnavailable(e)) => {
                    warn!(
                        "Best-effort first refresh for '{industry}' failed, keeping placeholder: {e}"
                    );
                    Ok(placeholder)
                }
                Err(other) => Err(other),
            }
        }
        Some(row) if row.is_stale_at(Utc::now()) => {
            refresh_industry(store, generator, retry, industry).await
        }
        Some(row) => Ok(row),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::mock::ScriptedGenerator;
    use crate::store::memory::MemoryInsightStore;
    use super::fixtures::insight_json;
    use std::time::Duration as StdDuration;
    use uuid::Uuid;

    fn fast_retry(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_delay: StdDuration::from_millis(10),
        }
    }

    fn stale_row(industry: &str) -> IndustryInsightRow {
        let last_updated = Utc::now() - Duration::days(8);
        IndustryInsightRow {
            id: Uuid::new_v4(),
            industry: industry.to_string(),
            salary_ranges: serde_json::json!([]),
            growth_rate: 1.0,
            demand_level: "LOW".to_string(),
            top_skills: vec!["old".to_string()],
            market_outlook: "NEGATIVE".to_string(),
            key_trends: vec![],
            recommended_skills: vec![],
            last_updated,
            next_update: last_updated + freshness_window(),
        }
    }

    fn fresh_row(industry: &str) -> IndustryInsightRow {
        let mut row = stale_row(industry);
        row.last_updated = Utc::now();
        row.next_update = row.last_updated + freshness_window();
        row
    }

    #[tokio::test]
    async fn test_fresh_record_is_served_without_generation() {
        let store = MemoryInsightStore::new();
        store.seed(fresh_row("Fintech"));
        let generator = ScriptedGenerator::always_ok(&insight_json());

        let row = get_or_refresh(&store, &generator, fast_retry(2), "Fintech")
            .await
            .unwrap();

        assert_eq!(generator.calls(), 0);
        assert_eq!(row.demand_level, "LOW"); // untouched cache hit
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_record_triggers_one_generation_and_advances_window() {
        let store = MemoryInsightStore::new();
        store.seed(stale_row("Fintech"));
        let generator = ScriptedGenerator::always_ok(&insight_json());

        let before = Utc::now();
        let row = get_or_refresh(&store, &generator, fast_retry(2), "Fintech")
            .await
            .unwrap();

        assert_eq!(generator.calls(), 1);
        assert!(row.last_updated >= before);
        assert_eq!(row.next_update, row.last_updated + Duration::days(7));
        assert_eq!(row.demand_level, "HIGH");
        assert_eq!(store.get("Fintech").unwrap().demand_level, "HIGH");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_refresh_failure_propagates() {
        let store = MemoryInsightStore::new();
        store.seed(stale_row("Fintech"));
        let generator = ScriptedGenerator::always_err("provider down");

        let result = get_or_refresh(&store, &generator, fast_retry(1), "Fintech").await;

        assert!(matches!(result, Err(AppError::GenerationUnavailable(_))));
        // the stale record is still there, unchanged
        assert_eq!(store.get("Fintech").unwrap().demand_level, "LOW");
    }

    #[tokio::test(start_paused = true)]
    async fn test_absent_industry_gets_placeholder_then_refresh() {
        let store = MemoryInsightStore::new();
        let generator = ScriptedGenerator::always_ok(&insight_json());

        let row = get_or_refresh(&store, &generator, fast_retry(2), "Robotics")
            .await
            .unwrap();

        assert_eq!(generator.calls(), 1);
        assert_eq!(row.demand_level, "HIGH");
    }

    #[tokio::test(start_paused = true)]
    async fn test_absent_industry_keeps_placeholder_when_refresh_fails() {
        let store = MemoryInsightStore::new();
        let generator = ScriptedGenerator::always_err("provider down");

        let row = get_or_refresh(&store, &generator, fast_retry(1), "Robotics")
            .await
            .unwrap();

        // swallowed failure: caller still gets the neutral placeholder
        assert_eq!(generator.calls(), 2); // max_retries + 1
        assert_eq!(row.demand_level, "MEDIUM");
        assert_eq!(row.market_outlook, "NEUTRAL");
        assert!(row.top_skills.is_empty());
        assert!(store.get("Robotics").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_output_is_retried_then_succeeds() {
        let store = MemoryInsightStore::new();
        store.seed(stale_row("Fintech"));
        let generator = ScriptedGenerator::new(vec![
            Ok("{\"not\": \"an insight\"}".to_string()),
            Ok(format!("```json\n{}\n```", insight_json())), // fenced on purpose
        ]);

        let row = get_or_refresh(&store, &generator, fast_retry(2), "Fintech")
            .await
            .unwrap();

        assert_eq!(generator.calls(), 2);
        assert_eq!(row.market_outlook, "POSITIVE");
    }

    #[tokio::test]
    async fn test_blank_industry_is_invalid_input() {
        let store = MemoryInsightStore::new();
        let generator = ScriptedGenerator::always_ok(&insight_json());

        let result = get_or_refresh(&store, &generator, fast_retry(0), "  ").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_upsert_same_payload_twice_is_idempotent() {
        let store = MemoryInsightStore::new();
        let record = placeholder_record(Utc::now());

        let first = store.upsert("Fintech", &record).await.unwrap();
        let second = store.upsert("Fintech", &record).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.last_updated, second.last_updated);
        assert_eq!(first.next_update, second.next_update);
        assert_eq!(store.industries().await.unwrap().len(), 1);
    }
}
