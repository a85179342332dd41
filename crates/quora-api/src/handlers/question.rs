// ============================================================================
// Quora API - Question Handlers
// File: crates/quora-api/src/handlers/question.rs
// ============================================================================
//! Question HTTP handlers (create, list, delete)

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use quora_core::domain::Question;
use quora_core::error::DomainError;
use quora_core::services::Operation;

use crate::error::HttpError;
use crate::extract::AccessToken;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Create question request payload
#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub content: String,
}

/// Outcome of a question mutation
#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub id: String,
    pub status: String,
}

/// Question DTO for listings
#[derive(Debug, Serialize)]
pub struct QuestionDetailsResponse {
    pub id: String,
    pub content: String,
}

impl From<Question> for QuestionDetailsResponse {
    fn from(question: Question) -> Self {
        Self {
            id: question.id.to_string(),
            content: question.content,
        }
    }
}

/// Create question handler - POST /question/create
///
/// A body that fails to parse is reported only after the session gate.
pub async fn create_question(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<QuestionResponse>>), HttpError> {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            state.questions.authenticate(&token, Operation::PostQuestion).await?;
            warn!("Create question rejected: {}", rejection);
            return Err(DomainError::ValidationError(rejection.body_text()).into());
        }
    };

    let created = state
        .questions
        .create(Question::draft(payload.content), &token)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(QuestionResponse {
            id: created.id.to_string(),
            status: "QUESTION CREATED".to_string(),
        })),
    ))
}

/// List questions handler - GET /question/all
pub async fn get_all_questions(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
) -> Result<Json<ApiResponse<Vec<QuestionDetailsResponse>>>, HttpError> {
    let questions = state.questions.list(&token).await?;

    Ok(Json(ApiResponse::success(
        questions.into_iter().map(QuestionDetailsResponse::from).collect(),
    )))
}

/// Delete question handler - DELETE /question/delete/{question_id}
pub async fn delete_question(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Path(question_id): Path<String>,
) -> Result<Json<ApiResponse<QuestionResponse>>, HttpError> {
    state.questions.delete(&question_id, &token).await?;

    Ok(Json(ApiResponse::success(QuestionResponse {
        id: question_id,
        status: "QUESTION DELETED".to_string(),
    })))
}
