//! Fixed authorization rules for question operations

use chrono::{DateTime, Utc};

use crate::domain::{Question, Session, User};
use crate::services::SessionValidator;

pub struct AuthorizationPolicy;

impl AuthorizationPolicy {
    /// Posting and listing need nothing beyond an active session.
    pub fn can_act(session: &Session, now: DateTime<Utc>) -> bool {
        !SessionValidator::is_signed_out(session, now)
    }

    /// Administrators may delete any question; everyone else only their own.
    pub fn can_delete(actor: &User, question: &Question) -> bool {
        actor.is_admin() || question.is_owned_by(&actor.id)
    }
}
