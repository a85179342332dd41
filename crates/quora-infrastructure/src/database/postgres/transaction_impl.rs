// ============================================================================
// Quora Infrastructure - PostgreSQL Transaction Scope
// File: crates/quora-infrastructure/src/database/postgres/transaction_impl.rs
// ============================================================================
//! Transaction scope over one pooled connection. Session reads take a share
//! lock and question reads an update lock, so a concurrent logout or delete
//! waits until this scope commits or rolls back.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tokio::sync::Mutex;
use uuid::Uuid;
use tracing::debug;

use quora_core::domain::{Question, Session, User};
use quora_core::error::DomainError;
use quora_core::repositories::{
    QuestionRepository, SessionRepository, StoreScope, TransactionManager, UserRepository,
};

use super::rows::{
    db_error, fetch_all_questions, fetch_question, fetch_session, fetch_user, insert_question,
    remove_question, RowLock,
};

pub struct PgTransactionManager {
    pool: PgPool,
}

impl PgTransactionManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionManager for PgTransactionManager {
    async fn begin(&self) -> Result<Box<dyn StoreScope>, DomainError> {
        let tx = self.pool.begin().await.map_err(db_error("beginning transaction"))?;
        debug!("Transaction started");
        Ok(Box::new(PgStoreScope {
            tx: Mutex::new(Some(tx)),
        }))
    }
}

/// Open transaction. Dropped without commit, sqlx rolls it back.
pub struct PgStoreScope {
    tx: Mutex<Option<Transaction<'static, Postgres>>>,
}

fn finished() -> DomainError {
    DomainError::InternalError("transaction already finished".to_string())
}

#[async_trait]
impl SessionRepository for PgStoreScope {
    async fn find_by_token(&self, access_token: &str) -> Result<Option<Session>, DomainError> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or_else(finished)?;
        fetch_session(&mut **tx, access_token, RowLock::Share).await
    }
}

#[async_trait]
impl UserRepository for PgStoreScope {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or_else(finished)?;
        fetch_user(&mut **tx, id).await
    }
}

#[async_trait]
impl QuestionRepository for PgStoreScope {
    async fn create(&self, question: &Question) -> Result<Question, DomainError> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or_else(finished)?;
        insert_question(&mut **tx, question).await
    }

    async fn find_all(&self) -> Result<Vec<Question>, DomainError> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or_else(finished)?;
        fetch_all_questions(&mut **tx).await
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Question>, DomainError> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or_else(finished)?;
        fetch_question(&mut **tx, id, RowLock::Update).await
    }

    async fn delete(&self, question: &Question) -> Result<(), DomainError> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or_else(finished)?;
        remove_question(&mut **tx, &question.id).await
    }
}

#[async_trait]
impl StoreScope for PgStoreScope {
    async fn commit(&self) -> Result<(), DomainError> {
        let tx = self.tx.lock().await.take().ok_or_else(finished)?;
        tx.commit().await.map_err(db_error("committing transaction"))?;
        debug!("Transaction committed");
        Ok(())
    }

    async fn rollback(&self) -> Result<(), DomainError> {
        let tx = self.tx.lock().await.take().ok_or_else(finished)?;
        tx.rollback().await.map_err(db_error("rolling back transaction"))?;
        debug!("Transaction rolled back");
        Ok(())
    }
}
