//! Transaction scope traits (port)
//!
//! A [`StoreScope`] sees and mutates the stores inside one transaction. Work
//! done through it becomes visible to others only after [`StoreScope::commit`].
//! Dropping a scope without committing rolls it back.

use async_trait::async_trait;
use crate::error::DomainError;
use crate::repositories::{QuestionRepository, SessionRepository, UserRepository};

#[async_trait]
pub trait StoreScope: SessionRepository + UserRepository + QuestionRepository {
    async fn commit(&self) -> Result<(), DomainError>;
    async fn rollback(&self) -> Result<(), DomainError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionManager: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn StoreScope>, DomainError>;
}
