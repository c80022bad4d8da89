pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::insights::handlers as insight_handlers;
use crate::interview::handlers as interview_handlers;
use crate::letters::handlers as letter_handlers;
use crate::profile;
use crate::resume::handlers as resume_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile
        .route("/api/v1/profile", patch(profile::handle_update_profile))
        // Industry insights
        .route("/api/v1/insights", get(insight_handlers::handle_get_insights))
        .route(
            "/api/v1/insights/refresh",
            post(insight_handlers::handle_refresh_insights),
        )
        // Cover letters
        .route(
            "/api/v1/cover-letters",
            post(letter_handlers::handle_generate).get(letter_handlers::handle_list),
        )
        .route(
            "/api/v1/cover-letters/:id",
            get(letter_handlers::handle_get).delete(letter_handlers::handle_delete),
        )
        // Interview prep
        .route(
            "/api/v1/interview/quiz",
            post(interview_handlers::handle_generate_quiz),
        )
        .route(
            "/api/v1/interview/results",
            post(interview_handlers::handle_save_result).get(interview_handlers::handle_list_results),
        )
        // Resume
        .route(
            "/api/v1/resume",
            put(resume_handlers::handle_save).get(resume_handlers::handle_get),
        )
        .route(
            "/api/v1/resume/improve",
            post(resume_handlers::handle_improve),
        )
        .route(
            "/api/v1/resume/analyze",
            post(resume_handlers::handle_analyze),
        )
        // Internal job triggers (weekly cron + manual single-industry)
        .route(
            "/internal/jobs/insights/refresh",
            post(insight_handlers::handle_batch_refresh),
        )
        .route(
            "/internal/jobs/insights/refresh/:industry",
            post(insight_handlers::handle_refresh_single),
        )
        .with_state(state)
}
