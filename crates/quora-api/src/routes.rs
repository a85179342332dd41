//! Route table

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{health, question};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Question routes
        .route("/question/create", post(question::create_question))
        .route("/question/all", get(question::get_all_questions))
        .route("/question/delete/{question_id}", delete(question::delete_question))
        .with_state(state)
}
