//! In-memory `InterviewStore` used by the pipeline tests. Mirrors the
//! Postgres semantics, including the structural exclusion of placeholder
//! rows from `find_questions`.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::question::QuestionRow;
use crate::models::result::{InterviewResultRow, NewInterviewResult};
use crate::models::user::UserProfileRow;
use crate::taxonomy::{normalize, role_marker, skill_marker, InterviewStore, UserStats, META_LEVEL};

#[derive(Default)]
pub struct MemoryStore {
    questions: Mutex<Vec<QuestionRow>>,
    results: Mutex<Vec<InterviewResultRow>>,
    users: Mutex<Vec<UserProfileRow>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn question_count(&self) -> usize {
        self.questions.lock().unwrap().len()
    }

    pub fn result_count(&self) -> usize {
        self.results.lock().unwrap().len()
    }

    /// Seeds a catalog row without normalization, bypassing dedup.
    pub fn seed_question(&self, text: &str, role: &str, skill: &str, level: &str) {
        self.questions.lock().unwrap().push(QuestionRow {
            id: Uuid::new_v4(),
            text: text.to_string(),
            role: role.to_string(),
            skill: skill.to_string(),
            level: level.to_string(),
        });
    }
}

fn matches_filter(value: &str, filter: &str) -> bool {
    filter.is_empty() || value == filter
}

#[async_trait]
impl InterviewStore for MemoryStore {
    async fn insert_question_if_new(
        &self,
        text: &str,
        role: &str,
        skill: &str,
        level: &str,
    ) -> Result<bool, AppError> {
        let text = text.trim().to_string();
        let (role, skill, level) = (normalize(role), normalize(skill), normalize(level));

        let mut questions = self.questions.lock().unwrap();
        let exists = questions.iter().any(|q| {
            q.text.eq_ignore_ascii_case(&text) && q.role == role && q.skill == skill && q.level == level
        });
        if exists {
            return Ok(false);
        }

        questions.push(QuestionRow {
            id: Uuid::new_v4(),
            text,
            role,
            skill,
            level,
        });
        Ok(true)
    }

    async fn insert_role_if_new(&self, role: &str) -> Result<(), AppError> {
        let role = normalize(role);
        if role.is_empty() {
            return Ok(());
        }

        let mut questions = self.questions.lock().unwrap();
        if questions.iter().any(|q| q.role == role) {
            return Ok(());
        }

        questions.push(QuestionRow {
            id: Uuid::new_v4(),
            text: role_marker(&role),
            role,
            skill: String::new(),
            level: META_LEVEL.to_string(),
        });
        Ok(())
    }

    async fn insert_skill_if_new(&self, skill: &str) -> Result<(), AppError> {
        let skill = normalize(skill);
        if skill.is_empty() {
            return Ok(());
        }

        let mut questions = self.questions.lock().unwrap();
        if questions.iter().any(|q| q.skill == skill) {
            return Ok(());
        }

        questions.push(QuestionRow {
            id: Uuid::new_v4(),
            text: skill_marker(&skill),
            role: String::new(),
            skill,
            level: META_LEVEL.to_string(),
        });
        Ok(())
    }

    async fn find_questions(
        &self,
        role: &str,
        skill: &str,
        level: &str,
    ) -> Result<Vec<QuestionRow>, AppError> {
        let (role, skill, level) = (normalize(role), normalize(skill), normalize(level));
        let questions = self.questions.lock().unwrap();
        Ok(questions
            .iter()
            .filter(|q| {
                q.level != META_LEVEL
                    && matches_filter(&q.role, &role)
                    && matches_filter(&q.skill, &skill)
                    && matches_filter(&q.level, &level)
            })
            .cloned()
            .collect())
    }

    async fn list_roles(&self) -> Result<Vec<String>, AppError> {
        let questions = self.questions.lock().unwrap();
        let mut roles: Vec<String> = questions
            .iter()
            .map(|q| q.role.clone())
            .filter(|r| !r.is_empty())
            .collect();
        roles.sort();
        roles.dedup();
        Ok(roles)
    }

    async fn list_skills(&self) -> Result<Vec<String>, AppError> {
        let questions = self.questions.lock().unwrap();
        let mut skills: Vec<String> = questions
            .iter()
            .map(|q| q.skill.clone())
            .filter(|s| !s.is_empty())
            .collect();
        skills.sort();
        skills.dedup();
        Ok(skills)
    }

    async fn list_questions(&self) -> Result<Vec<QuestionRow>, AppError> {
        Ok(self.questions.lock().unwrap().clone())
    }

    async fn insert_result(
        &self,
        new: NewInterviewResult,
    ) -> Result<InterviewResultRow, AppError> {
        let row = InterviewResultRow {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            session_id: new.session_id,
            question: new.question,
            answer: new.answer,
            score: new.score,
            strengths: new.strengths,
            weaknesses: new.weaknesses,
            improved_answer: new.improved_answer,
            created_at: Utc::now(),
        };
        self.results.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn session_results(
        &self,
        session_id: &str,
    ) -> Result<Vec<InterviewResultRow>, AppError> {
        let results = self.results.lock().unwrap();
        Ok(results
            .iter()
            .filter(|r| r.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn user_stats(&self, user_id: Uuid) -> Result<UserStats, AppError> {
        let results = self.results.lock().unwrap();
        let scores: Vec<i32> = results
            .iter()
            .filter(|r| r.user_id == Some(user_id))
            .map(|r| r.score)
            .collect();

        let total_attempts = scores.len() as i64;
        let average_score = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<i32>() as f64 / scores.len() as f64
        };

        Ok(UserStats {
            total_attempts,
            average_score,
        })
    }

    async fn list_users(&self) -> Result<Vec<UserProfileRow>, AppError> {
        Ok(self.users.lock().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_question_if_new_dedups_case_insensitive() {
        let store = MemoryStore::new();
        assert!(store
            .insert_question_if_new("What is a closure?", "Backend Developer", "python", "easy")
            .await
            .unwrap());
        assert!(!store
            .insert_question_if_new("WHAT IS A CLOSURE?", "backend developer", "PYTHON", "Easy")
            .await
            .unwrap());
        assert_eq!(store.question_count(), 1);
    }

    #[tokio::test]
    async fn test_same_text_different_tuple_is_distinct() {
        let store = MemoryStore::new();
        store
            .insert_question_if_new("Explain indexing.", "backend developer", "mysql", "easy")
            .await
            .unwrap();
        assert!(store
            .insert_question_if_new("Explain indexing.", "data analyst", "mysql", "easy")
            .await
            .unwrap());
        assert_eq!(store.question_count(), 2);
    }

    #[tokio::test]
    async fn test_insert_role_if_new_records_once() {
        let store = MemoryStore::new();
        store.insert_role_if_new(" ML Engineer ").await.unwrap();
        store.insert_role_if_new("ml engineer").await.unwrap();
        assert_eq!(store.question_count(), 1);

        let roles = store.list_roles().await.unwrap();
        assert_eq!(roles, vec!["ml engineer".to_string()]);
    }

    #[tokio::test]
    async fn test_insert_role_if_new_empty_is_noop() {
        let store = MemoryStore::new();
        store.insert_role_if_new("   ").await.unwrap();
        assert_eq!(store.question_count(), 0);
    }

    #[tokio::test]
    async fn test_existing_role_suppresses_placeholder() {
        let store = MemoryStore::new();
        store
            .insert_question_if_new("What is REST?", "backend developer", "python", "easy")
            .await
            .unwrap();
        store.insert_role_if_new("backend developer").await.unwrap();
        assert_eq!(store.question_count(), 1);
    }

    #[tokio::test]
    async fn test_placeholders_never_served() {
        let store = MemoryStore::new();
        store.insert_skill_if_new("kubernetes").await.unwrap();

        // Even an explicit request for the meta level finds nothing.
        let served = store.find_questions("", "kubernetes", "meta").await.unwrap();
        assert!(served.is_empty());
        let wildcard = store.find_questions("", "", "").await.unwrap();
        assert!(wildcard.is_empty());

        // But the skill is visible to the taxonomy listings.
        assert_eq!(store.list_skills().await.unwrap(), vec!["kubernetes".to_string()]);
    }

    #[tokio::test]
    async fn test_find_questions_wildcards() {
        let store = MemoryStore::new();
        store
            .insert_question_if_new("Q1", "backend developer", "python", "easy")
            .await
            .unwrap();
        store
            .insert_question_if_new("Q2", "backend developer", "django", "hard")
            .await
            .unwrap();

        assert_eq!(store.find_questions("backend developer", "", "").await.unwrap().len(), 2);
        assert_eq!(store.find_questions("", "python", "").await.unwrap().len(), 1);
        assert_eq!(store.find_questions("", "", "hard").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_user_stats_averages_only_that_user() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        for (uid, score) in [(Some(user), 4), (Some(user), 8), (None, 10)] {
            store
                .insert_result(NewInterviewResult {
                    user_id: uid,
                    session_id: "s1".to_string(),
                    question: "q".to_string(),
                    answer: "a".to_string(),
                    score,
                    strengths: String::new(),
                    weaknesses: String::new(),
                    improved_answer: String::new(),
                })
                .await
                .unwrap();
        }

        let stats = store.user_stats(user).await.unwrap();
        assert_eq!(stats.total_attempts, 2);
        assert!((stats.average_score - 6.0).abs() < f64::EPSILON);
    }
}
