//! # Application Layer
//!
//! Use cases and the service traits they depend on. Connectors implement the
//! traits; front ends (HTTP server, terminal chat, CLI) drive the use cases.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
