//! Domain services (business logic)

pub mod session_validator;
pub mod authorization_policy;
pub mod question_service;

pub use session_validator::SessionValidator;
pub use authorization_policy::AuthorizationPolicy;
pub use question_service::{Operation, QuestionService};
