//! # Quora Infrastructure
//! 
//! Store implementations (adapters): PostgreSQL via sqlx, and an in-process
//! store for tests and local runs.

pub mod database;
pub mod memory;

pub use database::{create_pool, run_migrations, PgQuestionRepository, PgSessionRepository, PgTransactionManager};
pub use memory::InMemoryStore;
