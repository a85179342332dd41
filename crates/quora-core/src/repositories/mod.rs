//! Repository traits (ports)

pub mod session_repository;
pub mod user_repository;
pub mod question_repository;
pub mod transaction;

pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;
pub use question_repository::QuestionRepository;
pub use transaction::{StoreScope, TransactionManager};

#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use question_repository::MockQuestionRepository;
#[cfg(test)]
pub use transaction::MockTransactionManager;
