use async_trait::async_trait;

use crate::domain::{DomainError, GenerationRequest};

/// Sends a composed generation request to a language model and returns its text.
///
/// Implementors encapsulate transport, serialization and vendor-specific API
/// details. The returned text must be exactly what the model produced; an
/// implementor that cannot find a textual field reports
/// [`DomainError::UpstreamContract`] instead of returning partial output.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, DomainError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
