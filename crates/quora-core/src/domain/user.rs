// ============================================================================
// Quora Core - User Entity
// File: crates/quora-core/src/domain/user.rs
// Description: User identity and role
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use quora_shared::constants::{ROLE_ADMIN, ROLE_NON_ADMIN};
use quora_shared::new_id;

/// User role enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[serde(rename = "nonadmin")]
    Regular,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::Regular => ROLE_NON_ADMIN,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            ROLE_ADMIN => Some(UserRole::Admin),
            ROLE_NON_ADMIN | "regular" => Some(UserRole::Regular),
            _ => None,
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Regular
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: Uuid,

    #[validate(length(min = 1, max = 30, message = "User name must be between 1 and 30 characters"))]
    pub user_name: String,

    #[validate(email)]
    pub email: String,

    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        user_name: String,
        email: String,
        role: UserRole,
    ) -> Result<Self, validator::ValidationErrors> {
        let user = Self {
            id: new_id(),
            user_name: user_name.trim().to_string(),
            email: email.trim().to_lowercase(),
            role,
            created_at: Utc::now(),
        };

        user.validate()?;
        Ok(user)
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user() {
        let user = User::new("alice".to_string(), "Alice@Example.com".to_string(), UserRole::Regular);
        assert!(user.is_ok());
        let user = user.unwrap();
        assert_eq!(user.email, "alice@example.com");
        assert!(!user.is_admin());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let user = User::new("bob".to_string(), "not-an-email".to_string(), UserRole::Admin);
        assert!(user.is_err());
    }

    #[test]
    fn test_role_strings() {
        assert_eq!(UserRole::from_str("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_str("nonadmin"), Some(UserRole::Regular));
        assert_eq!(UserRole::from_str("superuser"), None);
        assert_eq!(UserRole::from_str("superuser").unwrap_or_default(), UserRole::Regular);
        assert_eq!(UserRole::Admin.as_str(), "admin");
    }
}
