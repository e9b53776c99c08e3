//! Multipart upload handler for resume analysis.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::errors::AppError;
use crate::resume::analyze::{analyze_resume, ResumeInsight};
use crate::state::AppState;

/// POST /analyze_resume — expects a multipart file field named "resume".
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeInsight>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("resume") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::FileRead(e.to_string()))?;

        let insight = analyze_resume(
            state.store.as_ref(),
            state.gateway.as_ref(),
            &filename,
            &bytes,
        )
        .await?;
        return Ok(Json(insight));
    }

    Err(AppError::Validation("Upload a resume".to_string()))
}
