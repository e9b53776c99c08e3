//! Evaluation Pipeline — scores a candidate answer against its question.
//!
//! prompt → gateway → reconcile → persist → return. Gateway and reconcile
//! failures abort before the persist step, so a stored `InterviewResult`
//! always reflects a fully reconciled evaluation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::prompts::{EVALUATOR_PROMPT_TEMPLATE, EVALUATOR_SYSTEM};
use crate::llm_client::ModelGateway;
use crate::models::result::NewInterviewResult;
use crate::reconcile::{int_field_clamped, reconcile_object, string_field};
use crate::taxonomy::InterviewStore;

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub question: String,
    pub answer: String,
    pub session_id: String,
    /// Identity reference from the external credential store; anonymous
    /// practice when absent.
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

/// Reconciled evaluation, returned to the caller and persisted verbatim.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Evaluation {
    pub score: i32,
    pub strengths: String,
    pub weaknesses: String,
    pub improved_answer: String,
}

pub async fn evaluate_answer(
    store: &dyn InterviewStore,
    gateway: &dyn ModelGateway,
    request: EvaluateRequest,
) -> Result<Evaluation, AppError> {
    if request.session_id.trim().is_empty() {
        return Err(AppError::Validation("session_id required".to_string()));
    }

    let prompt = EVALUATOR_PROMPT_TEMPLATE
        .replace("{question}", &request.question)
        .replace("{answer}", &request.answer);

    let raw = gateway.complete(EVALUATOR_SYSTEM, &prompt).await?;
    let obj = reconcile_object(&raw)?;

    let evaluation = Evaluation {
        score: int_field_clamped(&obj, "score", 0, 10) as i32,
        strengths: string_field(&obj, "strengths"),
        weaknesses: string_field(&obj, "weaknesses"),
        improved_answer: string_field(&obj, "improved_answer"),
    };

    store
        .insert_result(NewInterviewResult {
            user_id: request.user_id,
            session_id: request.session_id,
            question: request.question,
            answer: request.answer,
            score: evaluation.score,
            strengths: evaluation.strengths.clone(),
            weaknesses: evaluation.weaknesses.clone(),
            improved_answer: evaluation.improved_answer.clone(),
        })
        .await?;

    Ok(evaluation)
}
