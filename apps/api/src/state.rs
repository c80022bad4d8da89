use std::sync::Arc;

use sqlx::PgPool;

use crate::llm_client::TextGenerator;
use crate::store::{InsightStore, QuotaCounter};

/// Shared application state injected into all route handlers via Axum
/// extractors. The trait objects are the collaborator seams: production
/// wires the Anthropic client and the Postgres store, tests wire doubles.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: Arc<dyn TextGenerator>,
    pub insights: Arc<dyn InsightStore>,
    pub quotas: Arc<dyn QuotaCounter>,
}
