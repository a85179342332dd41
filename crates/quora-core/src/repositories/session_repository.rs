//! Session repository trait (port)

use async_trait::async_trait;
use crate::domain::Session;
use crate::error::DomainError;

/// The store keeps at most one session per access token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find_by_token(&self, access_token: &str) -> Result<Option<Session>, DomainError>;
}
