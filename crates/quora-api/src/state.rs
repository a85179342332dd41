use std::sync::Arc;
use quora_core::services::QuestionService;

#[derive(Clone)]
pub struct AppState {
    pub questions: Arc<QuestionService>,
    pub service_name: String,
}
