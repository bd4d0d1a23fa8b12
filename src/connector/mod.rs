//! # Connector Layer
//!
//! External integrations implementing the application traits:
//! - Text generation (OpenAI Responses API, offline mock)
//! - Suggestion search (Algolia, in-memory demo index)
//! - Front ends (HTTP gateway, terminal chat, CLI controllers)

pub mod adapter;
pub mod api;
pub mod tui;

pub use adapter::*;
pub use api::*;
