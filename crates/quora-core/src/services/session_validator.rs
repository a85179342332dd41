//! Resolves access tokens to sessions and evaluates their sign-out state

use std::sync::Arc;
use chrono::{DateTime, Utc};
use tracing::warn;

use quora_shared::utils::mask_token;

use crate::clock::Clock;
use crate::domain::Session;
use crate::error::{DomainError, ErrorCode};
use crate::repositories::SessionRepository;

#[derive(Clone)]
pub struct SessionValidator {
    clock: Arc<dyn Clock>,
}

impl SessionValidator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Current wall-clock time, read on every call.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Looks up the session for `access_token`.
    ///
    /// Signed-out sessions are returned as-is; the caller picks the error
    /// code for that case. Store errors pass through untouched.
    pub async fn validate<S>(&self, sessions: &S, access_token: &str) -> Result<Session, DomainError>
    where
        S: SessionRepository + ?Sized,
    {
        sessions
            .find_by_token(access_token)
            .await?
            .ok_or_else(|| {
                warn!("No session for access token {}", mask_token(access_token));
                DomainError::Authentication(ErrorCode::UserNotSignedIn)
            })
    }

    pub fn is_signed_out(session: &Session, now: DateTime<Utc>) -> bool {
        session.is_signed_out(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    use crate::clock::FixedClock;
    use crate::repositories::MockSessionRepository;

    fn session(token: &str, login_at: DateTime<Utc>) -> Session {
        Session::new(Uuid::new_v4(), token.to_string(), login_at, Duration::hours(1))
    }

    #[tokio::test]
    async fn test_unknown_token_is_not_signed_in() {
        let mut repo = MockSessionRepository::new();
        repo.expect_find_by_token().returning(|_| Ok(None));
        let validator = SessionValidator::new(Arc::new(FixedClock(Utc::now())));

        let result = validator.validate(&repo, "missing").await;
        assert!(matches!(
            result,
            Err(DomainError::Authentication(ErrorCode::UserNotSignedIn))
        ));
    }

    #[tokio::test]
    async fn test_signed_out_session_is_still_returned() {
        let now = Utc::now();
        let mut stored = session("t-1", now - Duration::hours(3));
        stored.sign_out(now - Duration::hours(2));
        let expected = stored.clone();

        let mut repo = MockSessionRepository::new();
        repo.expect_find_by_token()
            .withf(|token| token == "t-1")
            .returning(move |_| Ok(Some(stored.clone())));
        let validator = SessionValidator::new(Arc::new(FixedClock(now)));

        let found = validator.validate(&repo, "t-1").await.unwrap();
        assert_eq!(found, expected);
        assert!(SessionValidator::is_signed_out(&found, validator.now()));
    }

    #[tokio::test]
    async fn test_store_errors_pass_through() {
        let mut repo = MockSessionRepository::new();
        repo.expect_find_by_token()
            .returning(|_| Err(DomainError::DatabaseError("connection refused".to_string())));
        let validator = SessionValidator::new(Arc::new(FixedClock(Utc::now())));

        let result = validator.validate(&repo, "any").await;
        assert!(matches!(result, Err(DomainError::DatabaseError(_))));
    }

    #[test]
    fn test_signed_out_is_monotonic_in_time() {
        let login_at = Utc::now();
        let active = session("t-2", login_at);
        let mut logged_out = session("t-3", login_at);
        logged_out.sign_out(login_at + Duration::minutes(10));

        for snapshot in [&active, &logged_out] {
            let mut seen_signed_out = false;
            for minutes in (0..180).step_by(5) {
                let signed_out = SessionValidator::is_signed_out(snapshot, login_at + Duration::minutes(minutes));
                if seen_signed_out {
                    assert!(signed_out, "session became active again at +{}m", minutes);
                }
                seen_signed_out |= signed_out;
            }
            assert!(seen_signed_out);
        }
    }
}
