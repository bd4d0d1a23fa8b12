use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::SuggestionIndex;
use crate::domain::{DomainError, Suggestion};

pub const DEFAULT_INDEX_NAME: &str = "prod_transformations_en";
pub const DEFAULT_HITS_PER_PAGE: u32 = 5;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    query: &'a str,
    hits_per_page: u32,
}

/// Subset of the Algolia query response we read.
#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    hits: Vec<Suggestion>,
}

/// [`SuggestionIndex`] backed by an Algolia index, queried over its REST API
/// with a search-only key.
pub struct AlgoliaIndex {
    client: reqwest::Client,
    app_id: String,
    api_key: String,
    index_name: String,
    hits_per_page: u32,
    url: String,
}

impl AlgoliaIndex {
    pub fn new(
        app_id: impl Into<String>,
        api_key: impl Into<String>,
        index_name: impl Into<String>,
    ) -> Self {
        let app_id: String = app_id.into();
        let index_name: String = index_name.into();
        let url = format!("https://{app_id}-dsn.algolia.net/1/indexes/{index_name}/query");
        Self {
            client: reqwest::Client::new(),
            app_id,
            api_key: api_key.into(),
            index_name,
            hits_per_page: DEFAULT_HITS_PER_PAGE,
            url,
        }
    }

    pub fn with_hits_per_page(mut self, hits: u32) -> Self {
        self.hits_per_page = hits.max(1);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn parse_hits(body: &str) -> Result<Vec<Suggestion>, DomainError> {
        serde_json::from_str::<QueryResponse>(body)
            .map(|r| r.hits)
            .map_err(|e| DomainError::upstream_contract(format!("AlgoliaIndex: bad response: {e}")))
    }
}

#[async_trait]
impl SuggestionIndex for AlgoliaIndex {
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, DomainError> {
        let request = QueryRequest {
            query,
            hits_per_page: self.hits_per_page,
        };

        let response = self
            .client
            .post(&self.url)
            .header("X-Algolia-Application-Id", &self.app_id)
            .header("X-Algolia-API-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("AlgoliaIndex: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("AlgoliaIndex: {} returned {status}: {body}", self.index_name);
            return Err(DomainError::transport(format!(
                "AlgoliaIndex: search returned {status}"
            )));
        }

        let body = response.text().await.map_err(|e| {
            DomainError::transport(format!("AlgoliaIndex: failed to read body: {e}"))
        })?;
        let hits = Self::parse_hits(&body)?;
        debug!("AlgoliaIndex: {} hits for {:?}", hits.len(), query);
        Ok(hits)
    }

    fn index_name(&self) -> &str {
        &self.index_name
    }
}
