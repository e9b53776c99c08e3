//! Question Retrieval — the one read path with a generative fallback.
//!
//! A catalog hit picks uniformly at random among matches; a miss synthesizes
//! a question via the gateway and persists it, so the catalog grows as novel
//! (role, skill, level) combinations are requested.

use rand::seq::SliceRandom;
use serde::Serialize;

use crate::errors::AppError;
use crate::interview::prompts::{QUESTION_GEN_PROMPT_TEMPLATE, QUESTION_GEN_SYSTEM};
use crate::llm_client::ModelGateway;
use crate::reconcile;
use crate::taxonomy::{normalize, InterviewStore};

#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub text: String,
    pub role: String,
    pub skill: String,
    pub level: String,
}

pub async fn fetch_or_generate(
    store: &dyn InterviewStore,
    gateway: &dyn ModelGateway,
    role: &str,
    skill: &str,
    level: &str,
) -> Result<QuestionResponse, AppError> {
    let role = normalize(role);
    let skill = normalize(skill);
    let level = normalize(level);

    let matches = store.find_questions(&role, &skill, &level).await?;
    if let Some(question) = matches.choose(&mut rand::thread_rng()) {
        return Ok(QuestionResponse {
            text: question.text.clone(),
            role: question.role.clone(),
            skill: question.skill.clone(),
            level: question.level.clone(),
        });
    }

    // Empty filters fall back to the generation defaults.
    let role = or_default(role, "general");
    let skill = or_default(skill, "general");
    let level = or_default(level, "easy");

    let prompt = QUESTION_GEN_PROMPT_TEMPLATE
        .replace("{role}", &role)
        .replace("{skill}", &skill)
        .replace("{level}", &level);

    let raw = gateway.complete(QUESTION_GEN_SYSTEM, &prompt).await?;
    let text = reconcile::plain_text(&raw);

    if text.is_empty() {
        return Err(AppError::ModelUnavailable(
            crate::llm_client::LlmError::EmptyContent,
        ));
    }

    store
        .insert_question_if_new(&text, &role, &skill, &level)
        .await?;

    Ok(QuestionResponse {
        text,
        role,
        skill,
        level,
    })
}

fn or_default(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}
