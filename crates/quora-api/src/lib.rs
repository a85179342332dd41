//! # Quora API
//! 
//! HTTP handlers, request extractors, response envelope, and routing.

pub mod handlers;
pub mod error;
pub mod extract;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
