//! # Quora Core
//! 
//! Domain entities, session/authorization rules, the question lifecycle
//! service, and the repository traits it is composed from.

pub mod clock;
pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DomainError, ErrorCode};
