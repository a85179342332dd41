// ============================================================================
// Quora Infrastructure - In-Memory Store
// File: crates/quora-infrastructure/src/memory/mod.rs
// ============================================================================
//! In-process implementation of every store port.
//!
//! A transaction holds the store lock for its whole lifetime and works on a
//! staged copy of the data. Commit swaps the copy in; rollback or drop
//! discards it. Reads outside a transaction wait for an open one to finish.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info};
use uuid::Uuid;

use quora_core::domain::{Question, Session, User};
use quora_core::error::DomainError;
use quora_core::repositories::{
    QuestionRepository, SessionRepository, StoreScope, TransactionManager, UserRepository,
};

#[derive(Debug, Default, Clone)]
struct StoreData {
    users: HashMap<Uuid, User>,
    /// Keyed by access token: one session per token.
    sessions: HashMap<String, Session>,
    /// Insertion order is the store order.
    questions: Vec<Question>,
}

impl StoreData {
    fn session(&self, access_token: &str) -> Option<Session> {
        self.sessions.get(access_token).cloned()
    }

    fn user(&self, id: &Uuid) -> Option<User> {
        self.users.get(id).cloned()
    }

    fn question(&self, id: &Uuid) -> Option<Question> {
        self.questions.iter().find(|q| q.id == *id).cloned()
    }

    fn insert_question(&mut self, question: &Question) -> Result<Question, DomainError> {
        if self.question(&question.id).is_some() {
            return Err(DomainError::DatabaseError(format!(
                "duplicate question id {}",
                question.id
            )));
        }
        self.questions.push(question.clone());
        Ok(question.clone())
    }

    fn remove_question(&mut self, id: &Uuid) {
        self.questions.retain(|q| q.id != *id);
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    data: Arc<Mutex<StoreData>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_user(&self, user: User) {
        let mut data = self.data.lock().await;
        info!("User registered: {} ({})", user.id, user.role.as_str());
        data.users.insert(user.id, user);
    }

    /// Stores a new session. A token that is already in use is rejected.
    pub async fn open_session(&self, session: Session) -> Result<(), DomainError> {
        let mut data = self.data.lock().await;
        if data.sessions.contains_key(&session.access_token) {
            return Err(DomainError::ValidationError(
                "access token already bound to a session".to_string(),
            ));
        }
        if !data.users.contains_key(&session.user_id) {
            return Err(DomainError::ValidationError(format!(
                "unknown user {}",
                session.user_id
            )));
        }
        debug!("Session opened for user {}", session.user_id);
        data.sessions.insert(session.access_token.clone(), session);
        Ok(())
    }

    /// Signs a session out. Returns false when the token is unknown or the
    /// session was already logged out; an existing logout stamp never moves.
    pub async fn logout(&self, access_token: &str, at: DateTime<Utc>) -> bool {
        let mut data = self.data.lock().await;
        match data.sessions.get_mut(access_token) {
            Some(session) => session.sign_out(at),
            None => false,
        }
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn find_by_token(&self, access_token: &str) -> Result<Option<Session>, DomainError> {
        Ok(self.data.lock().await.session(access_token))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.data.lock().await.user(id))
    }
}

#[async_trait]
impl QuestionRepository for InMemoryStore {
    async fn create(&self, question: &Question) -> Result<Question, DomainError> {
        self.data.lock().await.insert_question(question)
    }

    async fn find_all(&self) -> Result<Vec<Question>, DomainError> {
        Ok(self.data.lock().await.questions.clone())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Question>, DomainError> {
        Ok(self.data.lock().await.question(id))
    }

    async fn delete(&self, question: &Question) -> Result<(), DomainError> {
        self.data.lock().await.remove_question(&question.id);
        Ok(())
    }
}

#[async_trait]
impl TransactionManager for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn StoreScope>, DomainError> {
        let guard = self.data.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemoryScope {
            state: Mutex::new(Some(ScopeState { guard, staged })),
        }))
    }
}

struct ScopeState {
    guard: OwnedMutexGuard<StoreData>,
    staged: StoreData,
}

/// Transaction over an [`InMemoryStore`].
pub struct MemoryScope {
    state: Mutex<Option<ScopeState>>,
}

fn finished() -> DomainError {
    DomainError::InternalError("transaction already finished".to_string())
}

impl MemoryScope {
    async fn with_staged<T>(&self, f: impl FnOnce(&mut StoreData) -> T + Send) -> Result<T, DomainError> {
        let mut state = self.state.lock().await;
        let state = state.as_mut().ok_or_else(finished)?;
        Ok(f(&mut state.staged))
    }
}

#[async_trait]
impl SessionRepository for MemoryScope {
    async fn find_by_token(&self, access_token: &str) -> Result<Option<Session>, DomainError> {
        self.with_staged(|data| data.session(access_token)).await
    }
}

#[async_trait]
impl UserRepository for MemoryScope {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        self.with_staged(|data| data.user(id)).await
    }
}

#[async_trait]
impl QuestionRepository for MemoryScope {
    async fn create(&self, question: &Question) -> Result<Question, DomainError> {
        self.with_staged(|data| data.insert_question(question)).await?
    }

    async fn find_all(&self) -> Result<Vec<Question>, DomainError> {
        self.with_staged(|data| data.questions.clone()).await
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Question>, DomainError> {
        self.with_staged(|data| data.question(id)).await
    }

    async fn delete(&self, question: &Question) -> Result<(), DomainError> {
        self.with_staged(|data| data.remove_question(&question.id)).await
    }
}

#[async_trait]
impl StoreScope for MemoryScope {
    async fn commit(&self) -> Result<(), DomainError> {
        let ScopeState { mut guard, staged } = self.state.lock().await.take().ok_or_else(finished)?;
        *guard = staged;
        debug!("In-memory transaction committed");
        Ok(())
    }

    async fn rollback(&self) -> Result<(), DomainError> {
        self.state.lock().await.take().ok_or_else(finished)?;
        debug!("In-memory transaction rolled back");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quora_core::domain::UserRole;

    async fn store_with_user() -> (InMemoryStore, User) {
        let store = InMemoryStore::new();
        let user = User::new("alice".to_string(), "alice@example.com".to_string(), UserRole::Regular).unwrap();
        store.insert_user(user.clone()).await;
        (store, user)
    }

    #[tokio::test]
    async fn test_commit_publishes_staged_writes() {
        let (store, user) = store_with_user().await;
        let question = Question::new("Committed?".to_string(), user.id).unwrap();

        let scope = store.begin().await.unwrap();
        scope.create(&question).await.unwrap();
        scope.commit().await.unwrap();
        drop(scope);

        assert_eq!(store.find_all().await.unwrap(), vec![question]);
    }

    #[tokio::test]
    async fn test_rollback_and_drop_discard_staged_writes() {
        let (store, user) = store_with_user().await;

        let scope = store.begin().await.unwrap();
        scope.create(&Question::new("Rolled back".to_string(), user.id).unwrap()).await.unwrap();
        scope.rollback().await.unwrap();
        drop(scope);

        let scope = store.begin().await.unwrap();
        scope.create(&Question::new("Dropped".to_string(), user.id).unwrap()).await.unwrap();
        drop(scope);

        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_finished_scope_rejects_further_use() {
        let (store, _) = store_with_user().await;
        let scope = store.begin().await.unwrap();
        scope.commit().await.unwrap();

        assert!(matches!(scope.find_all().await, Err(DomainError::InternalError(_))));
        assert!(matches!(scope.rollback().await, Err(DomainError::InternalError(_))));
    }

    #[tokio::test]
    async fn test_one_session_per_token() {
        let (store, user) = store_with_user().await;
        let now = Utc::now();

        store
            .open_session(Session::new(user.id, "tok".to_string(), now, Duration::hours(1)))
            .await
            .unwrap();
        let duplicate = store
            .open_session(Session::new(user.id, "tok".to_string(), now, Duration::hours(2)))
            .await;

        assert!(matches!(duplicate, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_logout_is_one_way() {
        let (store, user) = store_with_user().await;
        let now = Utc::now();
        store
            .open_session(Session::new(user.id, "tok".to_string(), now, Duration::hours(1)))
            .await
            .unwrap();

        assert!(store.logout("tok", now + Duration::minutes(1)).await);
        assert!(!store.logout("tok", now + Duration::minutes(2)).await);
        assert!(!store.logout("unknown", now).await);

        let session = store.find_by_token("tok").await.unwrap().unwrap();
        assert_eq!(session.logout_at, Some(now + Duration::minutes(1)));
    }
}
