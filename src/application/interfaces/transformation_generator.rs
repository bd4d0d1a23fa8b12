use async_trait::async_trait;

use crate::domain::DomainError;

/// Produces a new transformation snippet from a free-text description.
///
/// This is the chat's view of the completion gateway: either the HTTP
/// `/complete` endpoint or the gateway use case running in-process.
#[async_trait]
pub trait TransformationGenerator: Send + Sync {
    async fn generate(&self, description: &str) -> Result<String, DomainError>;
}
