//! Taxonomy Store — deduplicated catalog of questions, roles, and skills.
//!
//! Roles and skills are not separate tables: a role (or skill) "exists" when
//! any question row carries it. First sightings from the resume pipeline are
//! recorded as placeholder rows (`level = "meta"`, marker text) that serving
//! queries exclude by construction.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::question::QuestionRow;
use crate::models::result::{InterviewResultRow, NewInterviewResult};
use crate::models::user::UserProfileRow;

/// Roles always offered in the picker, independent of catalog contents.
pub const DEFAULT_ROLES: &[&str] = &[
    "frontend developer",
    "backend developer",
    "full stack developer",
    "devops engineer",
    "software engineer",
    "data analyst",
    "data scientist",
];

/// Skills always offered in the picker, independent of catalog contents.
pub const DEFAULT_SKILLS: &[&str] = &[
    "javascript", "react", "python", "django", "java", "mysql", "html", "css",
];

/// Level reserved for placeholder rows; never matched by serving queries.
pub const META_LEVEL: &str = "meta";

/// Canonical form for all taxonomy values: trimmed and lowercased.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Marker text for a placeholder row recording a new role.
pub fn role_marker(role: &str) -> String {
    format!("[auto-role:{role}]")
}

/// Marker text for a placeholder row recording a new skill.
pub fn skill_marker(skill: &str) -> String {
    format!("[auto-skill:{skill}]")
}

/// Catalog values merged with the process-wide defaults: deduplicated,
/// sorted, empty values dropped.
pub fn merge_with_defaults(catalog: Vec<String>, defaults: &[&str]) -> Vec<String> {
    let mut set: BTreeSet<String> = catalog.into_iter().filter(|v| !v.is_empty()).collect();
    set.extend(defaults.iter().map(|s| s.to_string()));
    set.into_iter().collect()
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct UserStats {
    pub total_attempts: i64,
    pub average_score: f64,
}

/// Persistence seam for the pipelines. Production uses `PgStore`; tests use
/// the in-memory double. Insert operations normalize their own inputs.
#[async_trait]
pub trait InterviewStore: Send + Sync {
    /// Inserts unless an identical question exists (case-insensitive text,
    /// exact normalized tuple). Returns whether a row was inserted.
    async fn insert_question_if_new(
        &self,
        text: &str,
        role: &str,
        skill: &str,
        level: &str,
    ) -> Result<bool, AppError>;

    /// Records a role value via a placeholder row on first sighting.
    /// Empty (after normalization) is a no-op.
    async fn insert_role_if_new(&self, role: &str) -> Result<(), AppError>;

    /// Records a skill value via a placeholder row on first sighting.
    /// Empty (after normalization) is a no-op.
    async fn insert_skill_if_new(&self, skill: &str) -> Result<(), AppError>;

    /// Servable questions matching the normalized filters (empty = wildcard).
    /// Placeholder rows are excluded regardless of the filters.
    async fn find_questions(
        &self,
        role: &str,
        skill: &str,
        level: &str,
    ) -> Result<Vec<QuestionRow>, AppError>;

    async fn list_roles(&self) -> Result<Vec<String>, AppError>;

    async fn list_skills(&self) -> Result<Vec<String>, AppError>;

    async fn list_questions(&self) -> Result<Vec<QuestionRow>, AppError>;

    async fn insert_result(&self, new: NewInterviewResult)
        -> Result<InterviewResultRow, AppError>;

    /// Evaluations for a session in insertion order.
    async fn session_results(&self, session_id: &str) -> Result<Vec<InterviewResultRow>, AppError>;

    async fn user_stats(&self, user_id: Uuid) -> Result<UserStats, AppError>;

    async fn list_users(&self) -> Result<Vec<UserProfileRow>, AppError>;
}
