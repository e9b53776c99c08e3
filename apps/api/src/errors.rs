use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::reconcile::ReconcileError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to read file: {0}")]
    FileRead(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(#[from] LlmError),

    #[error(transparent)]
    MalformedModelOutput(#[from] ReconcileError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedFormat(msg) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_FORMAT",
                format!("Unsupported file format: {msg}"),
            ),
            AppError::FileRead(msg) => {
                tracing::error!("File read error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "FILE_READ_ERROR",
                    "Failed to read the uploaded file".to_string(),
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
            AppError::ModelUnavailable(e) => {
                tracing::error!("Model gateway error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MODEL_UNAVAILABLE",
                    "The AI model is unavailable".to_string(),
                )
            }
            AppError::MalformedModelOutput(e) => {
                tracing::error!("Unreconcilable model output: {e}");
                // The raw model text is preserved in the body for diagnosis.
                let body = Json(json!({
                    "error": {
                        "code": "MALFORMED_MODEL_OUTPUT",
                        "message": e.to_string(),
                        "raw": e.raw(),
                    }
                }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
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
