use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A catalog question tagged with its normalized (role, skill, level).
///
/// Rows with `level = "meta"` are placeholder markers recording that a role
/// or skill value has been seen; they are never served as questions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuestionRow {
    pub id: Uuid,
    pub text: String,
    pub role: String,
    pub skill: String,
    pub level: String,
}
