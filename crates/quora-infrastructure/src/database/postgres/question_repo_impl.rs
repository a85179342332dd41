// ============================================================================
// Quora Infrastructure - PostgreSQL Question Repository
// File: crates/quora-infrastructure/src/database/postgres/question_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;
use tracing::info;

use quora_core::domain::Question;
use quora_core::error::DomainError;
use quora_core::repositories::QuestionRepository;

use super::rows::{fetch_all_questions, fetch_question, insert_question, remove_question, RowLock};

pub struct PgQuestionRepository {
    pool: PgPool,
}

impl PgQuestionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionRepository for PgQuestionRepository {
    async fn create(&self, question: &Question) -> Result<Question, DomainError> {
        let created = insert_question(&self.pool, question).await?;
        info!("Question inserted: {}", created.id);
        Ok(created)
    }

    async fn find_all(&self) -> Result<Vec<Question>, DomainError> {
        fetch_all_questions(&self.pool).await
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Question>, DomainError> {
        fetch_question(&self.pool, id, RowLock::None).await
    }

    async fn delete(&self, question: &Question) -> Result<(), DomainError> {
        remove_question(&self.pool, &question.id).await
    }
}
