use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Quota exceeded: at most {max} {what} per {window}")]
    QuotaExceeded {
        max: i64,
        what: &'static str,
        window: &'static str,
    },

    #[error("Generation unavailable: {0}")]
    GenerationUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "Authentication required".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone()),
            AppError::QuotaExceeded { .. } => (
                StatusCode::TOO_MANY_REQUESTS,
                "QUOTA_EXCEEDED",
                self.to_string(),
            ),
            AppError::GenerationUnavailable(msg) => {
                tracing::error!("Generation unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "GENERATION_UNAVAILABLE",
                    "The AI service is temporarily unavailable. Try again shortly.".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_exceeded_message_names_limit_and_window() {
        let err = AppError::QuotaExceeded {
            max: 10,
            what: "cover letters",
            window: "24 hours",
        };
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains("cover letters"));
        assert!(msg.contains("24 hours"));
    }

    #[test]
    fn test_quota_exceeded_maps_to_429() {
        let err = AppError::QuotaExceeded {
            max: 5,
            what: "quizzes",
            window: "24 hours",
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_generation_unavailable_maps_to_503() {
        let err = AppError::GenerationUnavailable("provider timeout".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_unauthenticated_maps_to_401() {
        let response = AppError::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
