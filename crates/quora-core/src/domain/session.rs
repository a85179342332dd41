// ============================================================================
// Quora Core - Session Entity
// File: crates/quora-core/src/domain/session.rs
// Description: Access token bound to a user, with expiry and logout stamps
// ============================================================================

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quora_shared::new_id;

/// Session (auth token) entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub access_token: String,
    pub login_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub logout_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(user_id: Uuid, access_token: String, login_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            id: new_id(),
            user_id,
            access_token,
            login_at,
            expires_at: login_at + ttl,
            logout_at: None,
        }
    }

    /// Signed out by explicit logout, or by reaching `expires_at`.
    pub fn is_signed_out(&self, now: DateTime<Utc>) -> bool {
        self.logout_at.is_some() || now >= self.expires_at
    }

    /// Records a logout. A session that already has a logout stamp keeps it.
    /// Returns whether the stamp was written.
    pub fn sign_out(&mut self, at: DateTime<Utc>) -> bool {
        if self.logout_at.is_some() {
            return false;
        }
        self.logout_at = Some(at);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_at(login_at: DateTime<Utc>) -> Session {
        Session::new(Uuid::new_v4(), "token".to_string(), login_at, Duration::hours(8))
    }

    #[test]
    fn test_active_until_expiry() {
        let login_at = Utc::now();
        let session = session_at(login_at);

        assert!(!session.is_signed_out(login_at));
        assert!(!session.is_signed_out(login_at + Duration::hours(8) - Duration::seconds(1)));
        assert!(session.is_signed_out(login_at + Duration::hours(8)));
    }

    #[test]
    fn test_logout_wins_over_future_expiry() {
        let login_at = Utc::now();
        let mut session = session_at(login_at);

        assert!(session.sign_out(login_at + Duration::minutes(5)));
        assert!(session.is_signed_out(login_at + Duration::minutes(6)));
    }

    #[test]
    fn test_sign_out_is_one_way() {
        let login_at = Utc::now();
        let mut session = session_at(login_at);
        let first = login_at + Duration::minutes(1);

        assert!(session.sign_out(first));
        assert!(!session.sign_out(login_at + Duration::minutes(2)));
        assert_eq!(session.logout_at, Some(first));
    }
}
