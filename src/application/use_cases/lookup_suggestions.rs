use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::SuggestionIndex;
use crate::domain::Suggestion;

/// Queries shorter than this (after trimming, in characters) never reach the index.
pub const MIN_QUERY_LEN: usize = 2;

pub struct LookupSuggestionsUseCase {
    index: Arc<dyn SuggestionIndex>,
}

impl LookupSuggestionsUseCase {
    pub fn new(index: Arc<dyn SuggestionIndex>) -> Self {
        Self { index }
    }

    /// Look up existing transformations for partial input.
    ///
    /// Hits come back in the index's order. Index failures are logged and
    /// yield an empty list.
    pub async fn execute(&self, query: &str) -> Vec<Suggestion> {
        if query.trim().chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }

        match self.index.search(query).await {
            Ok(hits) => {
                debug!(
                    "{} suggestions for {:?} from {}",
                    hits.len(),
                    query,
                    self.index.index_name()
                );
                hits
            }
            Err(e) => {
                warn!(
                    "Suggestion lookup on {} failed: {e}. Showing no suggestions.",
                    self.index.index_name()
                );
                Vec::new()
            }
        }
    }
}
