//! Domain errors

use thiserror::Error;

/// Stable (code, reason) pairs surfaced to the caller of the question service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    UserNotSignedIn,
    PostAQuestionSignedOut,
    GetAllQuestionsSignedOut,
    DeleteQuestionSignedOut,
    QuestionOwnerAdminOnlyCanDelete,
    InvalidQuestion,
}

impl ErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UserNotSignedIn => "ATHR-001",
            ErrorCode::PostAQuestionSignedOut
            | ErrorCode::GetAllQuestionsSignedOut
            | ErrorCode::DeleteQuestionSignedOut => "ATHR-002",
            ErrorCode::QuestionOwnerAdminOnlyCanDelete => "ATHR-003",
            ErrorCode::InvalidQuestion => "QUES-001",
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            ErrorCode::UserNotSignedIn => "User has not signed in",
            ErrorCode::PostAQuestionSignedOut => {
                "User is signed out.Sign in first to post a question"
            }
            ErrorCode::GetAllQuestionsSignedOut => {
                "User is signed out.Sign in first to get all questions"
            }
            ErrorCode::DeleteQuestionSignedOut => {
                "User is signed out.Sign in first to delete a question"
            }
            ErrorCode::QuestionOwnerAdminOnlyCanDelete => {
                "Only the question owner or admin can delete the question"
            }
            ErrorCode::InvalidQuestion => "Entered question uuid does not exist",
        }
    }
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Authentication failed ({}): {}", .0.code(), .0.reason())]
    Authentication(ErrorCode),

    #[error("Authorization failed ({}): {}", .0.code(), .0.reason())]
    Authorization(ErrorCode),

    #[error("Not found ({}): {}", .0.code(), .0.reason())]
    NotFound(ErrorCode),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// The stable error code, for the three caller-correctable kinds.
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            DomainError::Authentication(code)
            | DomainError::Authorization(code)
            | DomainError::NotFound(code) => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_out_codes_share_code_but_not_reason() {
        let codes = [
            ErrorCode::PostAQuestionSignedOut,
            ErrorCode::GetAllQuestionsSignedOut,
            ErrorCode::DeleteQuestionSignedOut,
        ];
        for code in codes {
            assert_eq!(code.code(), "ATHR-002");
        }
        assert_ne!(codes[0].reason(), codes[1].reason());
        assert_ne!(codes[1].reason(), codes[2].reason());
    }

    #[test]
    fn test_display_includes_code_and_reason() {
        let err = DomainError::NotFound(ErrorCode::InvalidQuestion);
        let message = err.to_string();
        assert!(message.contains("QUES-001"));
        assert!(message.contains("does not exist"));
        assert_eq!(err.error_code(), Some(ErrorCode::InvalidQuestion));
        assert_eq!(DomainError::DatabaseError("down".into()).error_code(), None);
    }
}
