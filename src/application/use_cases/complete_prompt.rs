use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{error, info};

use crate::application::{TextGenerator, TransformationGenerator};
use crate::domain::{DomainError, GenerationRequest};

/// Instruction sent ahead of every user prompt. Not user-modifiable.
pub const SYSTEM_PROMPT: &str = concat!(
    "You are an assistant adept at taking in a prompt and outputting a helper function that ",
    "can support tasks that may include hydration, manipulation, and deletion of attributes, ",
    "with respect to Algolia JSON records. \n",
    "\n",
    "# Output Format\n",
    "\n",
    "Provide a structured and clear code snippet. The snippet must be framed with respect to a ",
    "hypothetical agnostic Algolia record that is JSON, and with respect to the ecommerce ",
    "vertical. Provide only the code snippet; no description needed. you do not need to share ",
    "example usage (e.g. with the JSON record) or any other information.\n",
    "\n",
    "The response should \"only include a JSON of the sample javascript helper function that ",
    "would accomplish the source prompt\".\n",
);

pub const PROMPT_REQUIRED: &str = "Prompt is required";

/// The completion gateway: validates a prompt, wraps it with the fixed
/// instruction and makes a single call to the text generator.
pub struct CompletePromptUseCase {
    generator: Arc<dyn TextGenerator>,
    temperature: f32,
    max_output_tokens: u32,
}

impl CompletePromptUseCase {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            temperature: 1.0,
            max_output_tokens: 2048,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = max;
        self
    }

    /// Build the outbound request for a prompt. Only the prompt varies between calls.
    pub fn compose(&self, prompt: &str) -> GenerationRequest {
        GenerationRequest::new(SYSTEM_PROMPT, prompt)
            .with_temperature(self.temperature)
            .with_top_p(1.0)
            .with_max_output_tokens(self.max_output_tokens)
    }

    pub async fn execute(&self, prompt: &str) -> Result<String, DomainError> {
        if prompt.trim().is_empty() {
            return Err(DomainError::invalid_input(PROMPT_REQUIRED));
        }

        let request = self.compose(prompt);
        let start_time = Instant::now();

        match self.generator.generate(&request).await {
            Ok(text) => {
                info!(
                    "Completion from {} ({} chars) in {:.2}s",
                    self.generator.model_name(),
                    text.len(),
                    start_time.elapsed().as_secs_f64()
                );
                Ok(text)
            }
            Err(e) => {
                error!("Completion via {} failed: {e}", self.generator.model_name());
                Err(e)
            }
        }
    }
}

#[async_trait]
impl TransformationGenerator for CompletePromptUseCase {
    async fn generate(&self, description: &str) -> Result<String, DomainError> {
        self.execute(description).await
    }
}
