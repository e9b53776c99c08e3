//! Axum route handlers for the interview flow and the admin catalog surface.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::evaluate::{evaluate_answer, EvaluateRequest, Evaluation};
use crate::interview::questions::{fetch_or_generate, QuestionResponse};
use crate::models::question::QuestionRow;
use crate::models::result::InterviewResultRow;
use crate::models::user::UserProfileRow;
use crate::state::AppState;
use crate::taxonomy::{merge_with_defaults, DEFAULT_ROLES, DEFAULT_SKILLS};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct QuestionQuery {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub skill: String,
    #[serde(default)]
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct AddQuestionRequest {
    pub text: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub skill: String,
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "easy".to_string()
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_attempts: i64,
    pub average_score: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /roles — catalog roles merged with the defaults, deduplicated, sorted.
pub async fn handle_get_roles(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    let roles = state.store.list_roles().await?;
    Ok(Json(merge_with_defaults(roles, DEFAULT_ROLES)))
}

/// GET /skills — catalog skills merged with the defaults, deduplicated, sorted.
pub async fn handle_get_skills(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    let skills = state.store.list_skills().await?;
    Ok(Json(merge_with_defaults(skills, DEFAULT_SKILLS)))
}

/// GET /get_question?role=&skill=&level=
pub async fn handle_get_question(
    State(state): State<AppState>,
    Query(params): Query<QuestionQuery>,
) -> Result<Json<QuestionResponse>, AppError> {
    let question = fetch_or_generate(
        state.store.as_ref(),
        state.gateway.as_ref(),
        &params.role,
        &params.skill,
        &params.level,
    )
    .await?;
    Ok(Json(question))
}

/// POST /evaluate
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<Evaluation>, AppError> {
    let evaluation =
        evaluate_answer(state.store.as_ref(), state.gateway.as_ref(), request).await?;
    Ok(Json(evaluation))
}

/// GET /session/questions?session_id=
pub async fn handle_session_questions(
    State(state): State<AppState>,
    Query(params): Query<SessionQuery>,
) -> Result<Json<Vec<InterviewResultRow>>, AppError> {
    let results = state.store.session_results(&params.session_id).await?;
    Ok(Json(results))
}

/// GET /dashboard?user_id=
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let stats = state.store.user_stats(params.user_id).await?;
    Ok(Json(DashboardResponse {
        total_attempts: stats.total_attempts,
        average_score: (stats.average_score * 10.0).round() / 10.0,
    }))
}

/// POST /admin/add-question
pub async fn handle_add_question(
    State(state): State<AppState>,
    Json(request): Json<AddQuestionRequest>,
) -> Result<Json<Value>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("Question text required".to_string()));
    }

    let inserted = state
        .store
        .insert_question_if_new(&request.text, &request.role, &request.skill, &request.level)
        .await?;

    Ok(Json(json!({
        "message": if inserted { "Question added" } else { "Question already exists" }
    })))
}

/// GET /admin/list-questions
pub async fn handle_list_questions(
    State(state): State<AppState>,
) -> Result<Json<Vec<QuestionRow>>, AppError> {
    Ok(Json(state.store.list_questions().await?))
}

/// GET /admin/list-users
pub async fn handle_list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserProfileRow>>, AppError> {
    Ok(Json(state.store.list_users().await?))
}
