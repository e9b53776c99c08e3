use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One persisted answer evaluation. Created exactly once per `/evaluate`
/// call, immutable afterward, ordered by `created_at` within a session.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewResultRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub session_id: String,
    pub question: String,
    pub answer: String,
    pub score: i32,
    pub strengths: String,
    pub weaknesses: String,
    pub improved_answer: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for an evaluation; the store assigns id and created_at.
#[derive(Debug, Clone)]
pub struct NewInterviewResult {
    pub user_id: Option<Uuid>,
    pub session_id: String,
    pub question: String,
    pub answer: String,
    pub score: i32,
    pub strengths: String,
    pub weaknesses: String,
    pub improved_answer: String,
}
