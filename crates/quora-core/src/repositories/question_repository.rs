//! Question repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::Question;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn create(&self, question: &Question) -> Result<Question, DomainError>;
    /// All questions, in the order the store keeps them.
    async fn find_all(&self) -> Result<Vec<Question>, DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Question>, DomainError>;
    async fn delete(&self, question: &Question) -> Result<(), DomainError>;
}
