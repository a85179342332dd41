// ============================================================================
// Quora Infrastructure - PostgreSQL Session Repository
// File: crates/quora-infrastructure/src/database/postgres/session_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::PgPool;

use quora_core::domain::Session;
use quora_core::error::DomainError;
use quora_core::repositories::SessionRepository;

use super::rows::{fetch_session, RowLock};

pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn find_by_token(&self, access_token: &str) -> Result<Option<Session>, DomainError> {
        fetch_session(&self.pool, access_token, RowLock::None).await
    }
}
