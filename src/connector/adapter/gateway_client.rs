use async_trait::async_trait;
use tracing::warn;

use crate::application::TransformationGenerator;
use crate::domain::{CompletionRequest, CompletionResponse, DomainError};

pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:3002";
const COMPLETE_PATH: &str = "/complete";

/// Client for a running completion gateway's `POST /complete` endpoint.
pub struct GatewayClient {
    client: reqwest::Client,
    url: String,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            url: format!("{}{}", base.trim_end_matches('/'), COMPLETE_PATH),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TransformationGenerator for GatewayClient {
    async fn generate(&self, description: &str) -> Result<String, DomainError> {
        let request = CompletionRequest {
            prompt: description.to_string(),
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("gateway unreachable: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("GatewayClient: {} returned {status}", self.url);
            return Err(DomainError::transport(format!(
                "Response status: {}",
                status.as_u16()
            )));
        }

        let body: CompletionResponse = response.json().await.map_err(|e| {
            DomainError::upstream_contract(format!("gateway sent an unexpected body: {e}"))
        })?;
        Ok(body.output_text)
    }
}
