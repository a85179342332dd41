//! API Response wrapper

use serde::Serialize;
use chrono::Utc;

use quora_core::error::ErrorCode;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Envelope for a stable domain code and its fixed reason.
    pub fn error(code: ErrorCode) -> Self {
        Self::failure(code.code(), code.reason())
    }

    /// Envelope for failures without a stable domain code.
    pub fn failure(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.to_string(),
            }),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_carries_code_and_reason() {
        let body = serde_json::to_value(ApiResponse::<()>::error(ErrorCode::QuestionOwnerAdminOnlyCanDelete)).unwrap();

        assert_eq!(body["success"], false);
        assert_eq!(body["data"], json!(null));
        assert_eq!(
            body["error"],
            json!({
                "code": "ATHR-003",
                "message": "Only the question owner or admin can delete the question"
            })
        );
    }

    #[test]
    fn test_success_has_no_error() {
        let body = serde_json::to_value(ApiResponse::success(vec![1, 2])).unwrap();

        assert_eq!(body["success"], true);
        assert_eq!(body["data"], json!([1, 2]));
        assert_eq!(body["error"], json!(null));
    }
}
