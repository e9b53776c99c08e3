//! Resume Analysis Pipeline — extract text, prompt the model, reconcile the
//! insight, and feed new roles/skills back into the taxonomy.
//!
//! The insight itself is transient: it is returned to the caller but never
//! stored as a row. The durable side effect is taxonomy enrichment.

use serde::Serialize;
use tracing::debug;

use crate::errors::AppError;
use crate::llm_client::ModelGateway;
use crate::reconcile::{int_field_clamped, reconcile_object, string_field, ReconcileError};
use crate::resume::extract::{extract_text, truncate_chars, FileKind, TEXT_LIMIT};
use crate::resume::prompts::{RESUME_ANALYSIS_PROMPT_TEMPLATE, RESUME_ANALYSIS_SYSTEM};
use crate::taxonomy::InterviewStore;

/// Structured resume insight. `top_skills` and `skills_missing` stay
/// comma-separated strings, matching the prompt contract.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResumeInsight {
    pub ats_score: i64,
    pub best_fit_role: String,
    pub top_skills: String,
    pub strengths: String,
    pub weaknesses: String,
    pub skills_missing: String,
    pub summary: String,
}

pub async fn analyze_resume(
    store: &dyn InterviewStore,
    gateway: &dyn ModelGateway,
    filename: &str,
    bytes: &[u8],
) -> Result<ResumeInsight, AppError> {
    // Format check comes first: an unsupported extension must fail before
    // any parsing or model traffic.
    let kind = FileKind::from_name(filename)
        .ok_or_else(|| AppError::UnsupportedFormat(filename.to_string()))?;

    let text = extract_text(kind, bytes)?;
    let excerpt = truncate_chars(&text, TEXT_LIMIT);
    debug!(
        "Resume text extracted: {} chars ({} after truncation)",
        text.chars().count(),
        excerpt.chars().count()
    );

    let prompt = RESUME_ANALYSIS_PROMPT_TEMPLATE.replace("{resume_text}", excerpt);
    let raw = gateway.complete(RESUME_ANALYSIS_SYSTEM, &prompt).await?;

    let insight = insight_from_raw(&raw)?;
    enrich_taxonomy(store, &insight).await?;

    Ok(insight)
}

/// Reconciles raw model output into a `ResumeInsight`.
fn insight_from_raw(raw: &str) -> Result<ResumeInsight, ReconcileError> {
    let obj = reconcile_object(raw)?;
    Ok(ResumeInsight {
        ats_score: int_field_clamped(&obj, "ats_score", 0, 100),
        best_fit_role: string_field(&obj, "best_fit_role"),
        top_skills: string_field(&obj, "top_skills"),
        strengths: string_field(&obj, "strengths"),
        weaknesses: string_field(&obj, "weaknesses"),
        skills_missing: string_field(&obj, "skills_missing"),
        summary: string_field(&obj, "summary"),
    })
}

/// Records the detected role and each top skill in the taxonomy.
/// Empty tokens are skipped by the store's no-op rule.
async fn enrich_taxonomy(
    store: &dyn InterviewStore,
    insight: &ResumeInsight,
) -> Result<(), AppError> {
    store.insert_role_if_new(&insight.best_fit_role).await?;
    for skill in insight.top_skills.split(',') {
        store.insert_skill_if_new(skill.trim()).await?;
    }
    Ok(())
}
