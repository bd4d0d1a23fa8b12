pub mod config;
pub mod container;
pub mod controller;
pub mod http;
pub mod router;

pub use config::{AppConfig, Service};
pub use container::{Container, GatewayMode};
pub use http::{build_router, serve, GatewayState};
pub use router::Router;
