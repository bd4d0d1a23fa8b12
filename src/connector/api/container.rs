use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::{
    CompletePromptUseCase, ConversationUseCase, LookupSuggestionsUseCase, SuggestionIndex,
    TextGenerator, TransformationGenerator,
};
use crate::connector::adapter::{
    AlgoliaIndex, GatewayClient, InMemorySuggestionIndex, MockTextGenerator, OpenAiClient,
};
use crate::domain::DomainError;

use super::config::AppConfig;

/// How the chat reaches the completion gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayMode {
    /// Over HTTP, against a running `transformbot serve`.
    Remote,
    /// In-process, calling the gateway use case directly.
    Embedded,
}

/// Builds the service handles from an [`AppConfig`] and hands out use cases.
///
/// Services whose configuration is missing are left unset; asking for a use
/// case that needs them returns a configuration error. Only an unreadable
/// `--records` file fails construction.
pub struct Container {
    text_generator: Option<Arc<dyn TextGenerator>>,
    suggestion_index: Option<Arc<dyn SuggestionIndex>>,
    config: AppConfig,
}

impl Container {
    pub fn new(config: AppConfig) -> Result<Self, DomainError> {
        let text_generator: Option<Arc<dyn TextGenerator>> = if config.mock {
            debug!("Using mock text generator");
            Some(Arc::new(MockTextGenerator::new()))
        } else {
            config.openai_api_key.as_deref().map(|key| {
                debug!(
                    "Using OpenAI model {} at {}",
                    config.openai_model, config.openai_base_url
                );
                Arc::new(OpenAiClient::new(
                    key,
                    config.openai_model.clone(),
                    config.openai_base_url.clone(),
                )) as Arc<dyn TextGenerator>
            })
        };

        let suggestion_index: Option<Arc<dyn SuggestionIndex>> = if config.mock {
            let index = match config.records_file.as_deref() {
                Some(path) => {
                    let index = InMemorySuggestionIndex::from_json_file(path)?;
                    if index.is_empty() {
                        warn!("{} holds no records", path.display());
                    }
                    debug!("Loaded {} records from {}", index.len(), path.display());
                    index
                }
                None => {
                    debug!("Using in-memory demo index");
                    InMemorySuggestionIndex::with_demo_records()
                }
            };
            Some(Arc::new(index.with_max_hits(config.hits_per_page as usize)))
        } else {
            match (
                config.algolia_app_id.as_deref(),
                config.algolia_search_key.as_deref(),
            ) {
                (Some(app_id), Some(key)) => {
                    debug!("Using Algolia index {}", config.index_name);
                    Some(Arc::new(
                        AlgoliaIndex::new(app_id, key, config.index_name.clone())
                            .with_hits_per_page(config.hits_per_page),
                    ))
                }
                _ => None,
            }
        };

        Ok(Self {
            text_generator,
            suggestion_index,
            config,
        })
    }

    pub fn complete_use_case(&self) -> Result<CompletePromptUseCase, DomainError> {
        let generator = self
            .text_generator
            .clone()
            .ok_or_else(|| DomainError::configuration("OPENAI_API_KEY is not set"))?;
        Ok(CompletePromptUseCase::new(generator)
            .with_temperature(self.config.temperature)
            .with_max_output_tokens(self.config.max_output_tokens))
    }

    pub fn lookup_use_case(&self) -> Result<LookupSuggestionsUseCase, DomainError> {
        let index = self.suggestion_index.clone().ok_or_else(|| {
            DomainError::configuration("ALGOLIA_APP_ID and ALGOLIA_SEARCH_KEY must be set")
        })?;
        Ok(LookupSuggestionsUseCase::new(index))
    }

    pub fn conversation_use_case(
        &self,
        mode: GatewayMode,
    ) -> Result<ConversationUseCase, DomainError> {
        let generator: Arc<dyn TransformationGenerator> = match mode {
            GatewayMode::Remote => Arc::new(GatewayClient::new(self.config.gateway_url.clone())),
            GatewayMode::Embedded => Arc::new(self.complete_use_case()?),
        };
        Ok(ConversationUseCase::new(generator))
    }

    pub fn gateway_url(&self) -> &str {
        &self.config.gateway_url
    }
}
