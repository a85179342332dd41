//! PostgreSQL repository implementations

mod rows;
pub mod session_repo_impl;
pub mod question_repo_impl;
pub mod transaction_impl;

pub use session_repo_impl::PgSessionRepository;
pub use question_repo_impl::PgQuestionRepository;
pub use transaction_impl::{PgStoreScope, PgTransactionManager};
