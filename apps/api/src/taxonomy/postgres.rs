//! Postgres-backed `InterviewStore`.
//!
//! Question dedup rides on the `questions_dedup_idx` unique index with
//! `ON CONFLICT DO NOTHING`, so two racing inserts of the same tuple collapse
//! to one row without an exists-then-insert window.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::question::QuestionRow;
use crate::models::result::{InterviewResultRow, NewInterviewResult};
use crate::models::user::UserProfileRow;
use crate::taxonomy::{normalize, role_marker, skill_marker, InterviewStore, UserStats, META_LEVEL};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterviewStore for PgStore {
    async fn insert_question_if_new(
        &self,
        text: &str,
        role: &str,
        skill: &str,
        level: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO questions (text, role, skill, level) VALUES ($1, $2, $3, $4)
             ON CONFLICT DO NOTHING",
        )
        .bind(text.trim())
        .bind(normalize(role))
        .bind(normalize(skill))
        .bind(normalize(level))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn insert_role_if_new(&self, role: &str) -> Result<(), AppError> {
        let role = normalize(role);
        if role.is_empty() {
            return Ok(());
        }

        // Single statement: the presence check and the placeholder insert
        // share one snapshot instead of an exists-then-insert window.
        sqlx::query(
            "INSERT INTO questions (text, role, skill, level)
             SELECT $1, $2, '', $3
             WHERE NOT EXISTS (SELECT 1 FROM questions WHERE role = $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(role_marker(&role))
        .bind(&role)
        .bind(META_LEVEL)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_skill_if_new(&self, skill: &str) -> Result<(), AppError> {
        let skill = normalize(skill);
        if skill.is_empty() {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO questions (text, role, skill, level)
             SELECT $1, '', $2, $3
             WHERE NOT EXISTS (SELECT 1 FROM questions WHERE skill = $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(skill_marker(&skill))
        .bind(&skill)
        .bind(META_LEVEL)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_questions(
        &self,
        role: &str,
        skill: &str,
        level: &str,
    ) -> Result<Vec<QuestionRow>, AppError> {
        // `level <> 'meta'` is unconditional: placeholder rows never serve,
        // even if a caller explicitly asks for level=meta.
        let rows = sqlx::query_as::<_, QuestionRow>(
            "SELECT id, text, role, skill, level FROM questions
             WHERE ($1 = '' OR role = $1)
               AND ($2 = '' OR skill = $2)
               AND ($3 = '' OR level = $3)
               AND level <> 'meta'",
        )
        .bind(normalize(role))
        .bind(normalize(skill))
        .bind(normalize(level))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_roles(&self) -> Result<Vec<String>, AppError> {
        let roles = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT role FROM questions WHERE role <> ''",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(roles)
    }

    async fn list_skills(&self) -> Result<Vec<String>, AppError> {
        let skills = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT skill FROM questions WHERE skill <> ''",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(skills)
    }

    async fn list_questions(&self) -> Result<Vec<QuestionRow>, AppError> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            "SELECT id, text, role, skill, level FROM questions",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn insert_result(
        &self,
        new: NewInterviewResult,
    ) -> Result<InterviewResultRow, AppError> {
        let row = sqlx::query_as::<_, InterviewResultRow>(
            "INSERT INTO interview_results
                 (user_id, session_id, question, answer, score,
                  strengths, weaknesses, improved_answer)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(new.user_id)
        .bind(&new.session_id)
        .bind(&new.question)
        .bind(&new.answer)
        .bind(new.score)
        .bind(&new.strengths)
        .bind(&new.weaknesses)
        .bind(&new.improved_answer)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn session_results(
        &self,
        session_id: &str,
    ) -> Result<Vec<InterviewResultRow>, AppError> {
        let rows = sqlx::query_as::<_, InterviewResultRow>(
            "SELECT * FROM interview_results WHERE session_id = $1 ORDER BY created_at",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn user_stats(&self, user_id: Uuid) -> Result<UserStats, AppError> {
        let (total_attempts, average_score) = sqlx::query_as::<_, (i64, f64)>(
            "SELECT COUNT(*), COALESCE(AVG(score)::float8, 0::float8)
             FROM interview_results WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(UserStats {
            total_attempts,
            average_score,
        })
    }

    async fn list_users(&self) -> Result<Vec<UserProfileRow>, AppError> {
        let rows = sqlx::query_as::<_, UserProfileRow>("SELECT * FROM user_profiles")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}
