//! # Quora Core - Domain Module
//! 
//! Plain data records for users, sessions, and questions. Relations are
//! carried as identity fields and resolved through the repositories.

pub mod user;
pub mod session;
pub mod question;

// Re-export all entities and enums
pub use user::{User, UserRole};
pub use session::Session;
pub use question::Question;
