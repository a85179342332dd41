// ============================================================================
// Quora Core - Question Service
// File: crates/quora-core/src/services/question_service.rs
// ============================================================================
//! Question lifecycle: post, list, and delete, gated by session state and
//! ownership

use std::sync::Arc;
use uuid::Uuid;
use tracing::{info, warn, error};
use validator::Validate;

use quora_shared::utils::mask_token;

use crate::clock::Clock;
use crate::domain::{Question, Session};
use crate::error::{DomainError, ErrorCode};
use crate::repositories::{
    QuestionRepository, SessionRepository, StoreScope, TransactionManager, UserRepository,
};
use crate::services::{AuthorizationPolicy, SessionValidator};

/// Operations gated by the service. Each reports its own signed-out code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    PostQuestion,
    GetAllQuestions,
    DeleteQuestion,
}

impl Operation {
    pub fn signed_out_code(&self) -> ErrorCode {
        match self {
            Operation::PostQuestion => ErrorCode::PostAQuestionSignedOut,
            Operation::GetAllQuestions => ErrorCode::GetAllQuestionsSignedOut,
            Operation::DeleteQuestion => ErrorCode::DeleteQuestionSignedOut,
        }
    }
}

/// Question service composed from the store ports
pub struct QuestionService {
    sessions: Arc<dyn SessionRepository>,
    questions: Arc<dyn QuestionRepository>,
    transactions: Arc<dyn TransactionManager>,
    validator: SessionValidator,
}

impl QuestionService {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        questions: Arc<dyn QuestionRepository>,
        transactions: Arc<dyn TransactionManager>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            questions,
            transactions,
            validator: SessionValidator::new(clock),
        }
    }

    /// Post a question on behalf of the session's user.
    ///
    /// The owner is always taken from the session; any owner already set on
    /// `question` is overwritten. Content is validated only after the session
    /// gate passes.
    pub async fn create(&self, question: Question, access_token: &str) -> Result<Question, DomainError> {
        info!("Create question attempt with token {}", mask_token(access_token));

        let scope = self.transactions.begin().await?;
        let result = self.create_in(scope.as_ref(), question, access_token).await;
        let created = finish(scope, result).await?;

        info!("Question {} created by user {}", created.id, created.owner_id);
        Ok(created)
    }

    /// All questions, in store order.
    pub async fn list(&self, access_token: &str) -> Result<Vec<Question>, DomainError> {
        self.authenticate(access_token, Operation::GetAllQuestions).await?;

        self.questions.find_all().await
    }

    /// Runs the session gate for `operation` outside any transaction and
    /// returns the active session.
    pub async fn authenticate(&self, access_token: &str, operation: Operation) -> Result<Session, DomainError> {
        let session = self.validator.validate(self.sessions.as_ref(), access_token).await?;
        self.ensure_active(&session, operation)?;
        Ok(session)
    }

    /// Delete a question. Only its owner or an administrator may do so.
    ///
    /// `question_id` is resolved only after the session gate passes; a value
    /// that is not a valid UUID is reported like any unknown question.
    pub async fn delete(&self, question_id: &str, access_token: &str) -> Result<(), DomainError> {
        info!("Delete question {} attempt with token {}", question_id, mask_token(access_token));

        let scope = self.transactions.begin().await?;
        let result = self.delete_in(scope.as_ref(), question_id, access_token).await;
        finish(scope, result).await?;

        info!("Question {} deleted", question_id);
        Ok(())
    }

    async fn create_in(
        &self,
        scope: &dyn StoreScope,
        mut question: Question,
        access_token: &str,
    ) -> Result<Question, DomainError> {
        let session = self.validator.validate(scope, access_token).await?;
        self.ensure_active(&session, Operation::PostQuestion)?;

        question
            .validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;
        question.owner_id = session.user_id;
        scope.create(&question).await
    }

    async fn delete_in(
        &self,
        scope: &dyn StoreScope,
        question_id: &str,
        access_token: &str,
    ) -> Result<(), DomainError> {
        let session = self.validator.validate(scope, access_token).await?;
        self.ensure_active(&session, Operation::DeleteQuestion)?;

        let question = match Uuid::parse_str(question_id) {
            Ok(id) => QuestionRepository::find_by_id(scope, &id).await?,
            Err(_) => None,
        }
        .ok_or_else(|| {
            warn!("Delete failed: question {} does not exist", question_id);
            DomainError::NotFound(ErrorCode::InvalidQuestion)
        })?;

        // A session whose user is gone cannot act for anyone.
        let actor = UserRepository::find_by_id(scope, &session.user_id)
            .await?
            .ok_or_else(|| {
                warn!("Session {} references missing user {}", session.id, session.user_id);
                DomainError::Authentication(ErrorCode::UserNotSignedIn)
            })?;

        if !AuthorizationPolicy::can_delete(&actor, &question) {
            warn!("User {} may not delete question {} owned by {}", actor.id, question.id, question.owner_id);
            return Err(DomainError::Authorization(ErrorCode::QuestionOwnerAdminOnlyCanDelete));
        }

        scope.delete(&question).await
    }

    fn ensure_active(&self, session: &Session, operation: Operation) -> Result<(), DomainError> {
        if AuthorizationPolicy::can_act(session, self.validator.now()) {
            return Ok(());
        }
        warn!("{:?} rejected: session {} is signed out", operation, session.id);
        Err(DomainError::Authorization(operation.signed_out_code()))
    }
}

/// Commits on success and rolls back on error. The original error wins over
/// a failed rollback.
async fn finish<T>(scope: Box<dyn StoreScope>, result: Result<T, DomainError>) -> Result<T, DomainError> {
    match result {
        Ok(value) => {
            scope.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = scope.rollback().await {
                error!("Rollback failed after {}: {}", e, rollback_err);
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::clock::FixedClock;
    use crate::repositories::{MockQuestionRepository, MockSessionRepository, MockTransactionManager};

    fn service(
        sessions: MockSessionRepository,
        questions: MockQuestionRepository,
    ) -> QuestionService {
        // list never opens a transaction; an unexpected begin() panics the test.
        QuestionService::new(
            Arc::new(sessions),
            Arc::new(questions),
            Arc::new(MockTransactionManager::new()),
            Arc::new(FixedClock(Utc::now())),
        )
    }

    #[test]
    fn test_operation_signed_out_codes() {
        assert_eq!(Operation::PostQuestion.signed_out_code(), ErrorCode::PostAQuestionSignedOut);
        assert_eq!(Operation::GetAllQuestions.signed_out_code(), ErrorCode::GetAllQuestionsSignedOut);
        assert_eq!(Operation::DeleteQuestion.signed_out_code(), ErrorCode::DeleteQuestionSignedOut);
    }

    #[tokio::test]
    async fn test_list_unknown_token() {
        let mut sessions = MockSessionRepository::new();
        sessions.expect_find_by_token().returning(|_| Ok(None));
        let mut questions = MockQuestionRepository::new();
        questions.expect_find_all().never();

        let result = service(sessions, questions).list("nope").await;
        assert!(matches!(
            result,
            Err(DomainError::Authentication(ErrorCode::UserNotSignedIn))
        ));
    }

    #[tokio::test]
    async fn test_list_logged_out_session() {
        let now = Utc::now();
        let mut session = Session::new(Uuid::new_v4(), "t".to_string(), now, Duration::hours(1));
        session.sign_out(now);

        let mut sessions = MockSessionRepository::new();
        sessions.expect_find_by_token().returning(move |_| Ok(Some(session.clone())));
        let mut questions = MockQuestionRepository::new();
        questions.expect_find_all().never();

        let result = service(sessions, questions).list("t").await;
        assert!(matches!(
            result,
            Err(DomainError::Authorization(ErrorCode::GetAllQuestionsSignedOut))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_reports_operation_code() {
        let now = Utc::now();
        let mut session = Session::new(Uuid::new_v4(), "t".to_string(), now, Duration::hours(1));
        session.sign_out(now);

        let mut sessions = MockSessionRepository::new();
        sessions.expect_find_by_token().returning(move |_| Ok(Some(session.clone())));

        let result = service(sessions, MockQuestionRepository::new())
            .authenticate("t", Operation::PostQuestion)
            .await;
        assert!(matches!(
            result,
            Err(DomainError::Authorization(ErrorCode::PostAQuestionSignedOut))
        ));
    }

    #[tokio::test]
    async fn test_list_returns_store_order() {
        let now = Utc::now();
        let owner = Uuid::new_v4();
        let session = Session::new(owner, "t".to_string(), now - Duration::minutes(1), Duration::hours(1));
        let stored = vec![
            Question::new("second".to_string(), owner).unwrap(),
            Question::new("first".to_string(), owner).unwrap(),
        ];
        let expected = stored.clone();

        let mut sessions = MockSessionRepository::new();
        sessions.expect_find_by_token().returning(move |_| Ok(Some(session.clone())));
        let mut questions = MockQuestionRepository::new();
        questions.expect_find_all().times(1).returning(move || Ok(stored.clone()));

        let listed = service(sessions, questions).list("t").await.unwrap();
        assert_eq!(listed, expected);
    }
}
