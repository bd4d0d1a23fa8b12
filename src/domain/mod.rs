//! # Domain Layer
//!
//! Conversation models, the next-step decision and the error taxonomy.
//! This layer is independent of external services and transports.

pub mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
