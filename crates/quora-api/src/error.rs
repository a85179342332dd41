//! Maps domain errors to HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use quora_core::error::DomainError;

use crate::response::ApiResponse;

/// Domain error on its way out of a handler.
#[derive(Debug)]
pub struct HttpError(pub DomainError);

impl From<DomainError> for HttpError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::Authentication(_) => StatusCode::UNAUTHORIZED,
            DomainError::Authorization(_) => StatusCode::FORBIDDEN,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::ValidationError(_) => StatusCode::BAD_REQUEST,
            DomainError::DatabaseError(_) | DomainError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self.0 {
            DomainError::Authentication(code)
            | DomainError::Authorization(code)
            | DomainError::NotFound(code) => ApiResponse::<()>::error(*code),
            DomainError::ValidationError(message) => ApiResponse::failure("VALIDATION_ERROR", message),
            DomainError::DatabaseError(_) | DomainError::InternalError(_) => {
                error!("Request failed: {}", self.0);
                ApiResponse::failure("INTERNAL_ERROR", "Internal server error")
            }
        };
        (status, Json(body)).into_response()
    }
}
