use async_trait::async_trait;
use tracing::debug;

use crate::application::TextGenerator;
use crate::domain::{DomainError, GenerationRequest};

/// Offline [`TextGenerator`] that answers with a deterministic helper skeleton
/// named after the prompt.
pub struct MockTextGenerator;

impl MockTextGenerator {
    pub fn new() -> Self {
        Self
    }

    fn function_name(prompt: &str) -> String {
        let mut name = String::new();
        for word in prompt
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|w| !w.is_empty())
            .take(6)
        {
            let lower = word.to_ascii_lowercase();
            if name.is_empty() {
                if lower.starts_with(|c: char| c.is_ascii_digit()) {
                    name.push_str("transform");
                    name.push_str(&capitalize(&lower));
                } else {
                    name.push_str(&lower);
                }
            } else {
                name.push_str(&capitalize(&lower));
            }
        }
        if name.is_empty() {
            name.push_str("transformRecord");
        }
        name
    }

    fn render(prompt: &str) -> String {
        let summary = prompt.trim().replace('\n', " ");
        format!(
            "function {name}(record) {{\n  // {summary}\n  const updated = {{ ...record }};\n  return updated;\n}}",
            name = Self::function_name(prompt),
        )
    }
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, DomainError> {
        debug!("MockTextGenerator answering {:?}", request.prompt());
        Ok(Self::render(request.prompt()))
    }

    fn model_name(&self) -> &str {
        "mock-generator"
    }
}
