// ============================================================================
// Quora Core - Question Entity
// File: crates/quora-core/src/domain/question.rs
// Description: Discussion question owned by the user who posted it
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use quora_shared::new_id;

/// Question entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Question {
    pub id: Uuid,

    #[validate(length(min = 1, max = 500, message = "Question content must be between 1 and 500 characters"))]
    pub content: String,

    /// Set by the service when the question is posted; never reassigned.
    pub owner_id: Uuid,

    pub created_at: DateTime<Utc>,
}

impl Question {
    pub fn new(content: String, owner_id: Uuid) -> Result<Self, validator::ValidationErrors> {
        let question = Self {
            id: new_id(),
            content: content.trim().to_string(),
            owner_id,
            created_at: Utc::now(),
        };

        question.validate()?;
        Ok(question)
    }

    /// A question that has not been posted yet. The owner is filled in from
    /// the poster's session, and the content is validated once the poster is
    /// known to be signed in.
    pub fn draft(content: String) -> Self {
        Self {
            id: new_id(),
            content: content.trim().to_string(),
            owner_id: Uuid::nil(),
            created_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, user_id: &Uuid) -> bool {
        self.owner_id == *user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_question() {
        let owner = Uuid::new_v4();
        let question = Question::new("  What is ownership?  ".to_string(), owner).unwrap();

        assert_eq!(question.content, "What is ownership?");
        assert!(question.is_owned_by(&owner));
    }

    #[test]
    fn test_blank_content_rejected() {
        assert!(Question::new("   ".to_string(), Uuid::new_v4()).is_err());
        assert!(Question::draft("x".repeat(501)).validate().is_err());
        assert!(Question::draft("fine".to_string()).validate().is_ok());
    }
}
