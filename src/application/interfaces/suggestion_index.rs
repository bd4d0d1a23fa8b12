use async_trait::async_trait;

use crate::domain::{DomainError, Suggestion};

/// A hosted search index of existing transformations.
#[async_trait]
pub trait SuggestionIndex: Send + Sync {
    /// Run one query and return the hits in the index's relevance order.
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, DomainError>;

    fn index_name(&self) -> &str;
}
