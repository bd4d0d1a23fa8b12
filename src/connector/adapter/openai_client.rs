use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::application::TextGenerator;
use crate::domain::{DomainError, GenerationRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o";
const RESPONSES_PATH: &str = "/v1/responses";

/// OpenAI Responses API request payload.
#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    input: Vec<InputMessage<'a>>,
    text: TextOptions,
    reasoning: Map<String, Value>,
    tools: Vec<Value>,
    temperature: f32,
    max_output_tokens: u32,
    top_p: f32,
    store: bool,
}

#[derive(Serialize)]
struct InputMessage<'a> {
    role: &'a str,
    content: Vec<InputContent<'a>>,
}

#[derive(Serialize)]
struct InputContent<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    text: &'a str,
}

#[derive(Serialize)]
struct TextOptions {
    format: TextFormat,
}

#[derive(Serialize)]
struct TextFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl<'a> ApiRequest<'a> {
    fn new(model: &'a str, request: &'a GenerationRequest) -> Self {
        Self {
            model,
            input: vec![
                InputMessage::text("system", request.system()),
                InputMessage::text("user", request.prompt()),
            ],
            text: TextOptions {
                format: TextFormat { kind: "text" },
            },
            reasoning: Map::new(),
            tools: Vec::new(),
            temperature: request.temperature(),
            max_output_tokens: request.max_output_tokens(),
            top_p: request.top_p(),
            store: true,
        }
    }
}

impl<'a> InputMessage<'a> {
    fn text(role: &'a str, text: &'a str) -> Self {
        Self {
            role,
            content: vec![InputContent {
                kind: "input_text",
                text,
            }],
        }
    }
}

/// HTTP client for the OpenAI Responses API.
///
/// Implements [`TextGenerator`] so the completion gateway stays decoupled from
/// transport and serialization details. The response body is treated as
/// untyped JSON; only its generated text is read.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + RESPONSES_PATH).
    url: String,
}

impl OpenAiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), RESPONSES_PATH);
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Pull the generated text out of a Responses API body.
    ///
    /// A top-level `output_text` string wins. Otherwise the `output_text`
    /// content parts of `output` are concatenated in order. A body without
    /// any text, or with a non-string where text belongs, breaks the contract.
    pub fn extract_output_text(body: &Value) -> Result<String, DomainError> {
        if let Some(value) = body.get("output_text") {
            return value.as_str().map(str::to_string).ok_or_else(|| {
                DomainError::upstream_contract("output_text is not a string")
            });
        }

        let items = body
            .get("output")
            .and_then(Value::as_array)
            .ok_or_else(|| DomainError::upstream_contract("output_text is missing"))?;

        let mut text = String::new();
        let mut found = false;
        for part in items
            .iter()
            .filter_map(|item| item.get("content").and_then(Value::as_array))
            .flatten()
            .filter(|part| part.get("type").and_then(Value::as_str) == Some("output_text"))
        {
            let chunk = part.get("text").and_then(Value::as_str).ok_or_else(|| {
                DomainError::upstream_contract("output_text content has no string text")
            })?;
            text.push_str(chunk);
            found = true;
        }

        if found {
            Ok(text)
        } else {
            Err(DomainError::upstream_contract("output_text is missing"))
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, DomainError> {
        let payload = ApiRequest::new(&self.model, request);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("OpenAiClient: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAiClient: API returned {status}: {body}");
            return Err(DomainError::transport(format!(
                "OpenAiClient: API returned {status}"
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            DomainError::upstream_contract(format!("OpenAiClient: failed to parse response: {e}"))
        })?;
        debug!("OpenAiClient raw response: {body}");

        Self::extract_output_text(&body)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn top_level_output_text_is_used() {
        let body = json!({ "output_text": "function f(r){ return r; }" });
        assert_eq!(
            OpenAiClient::extract_output_text(&body).unwrap(),
            "function f(r){ return r; }"
        );
    }

    #[test]
    fn output_items_are_concatenated() {
        let body = json!({
            "id": "resp_1",
            "output": [
                { "type": "reasoning", "summary": [] },
                {
                    "type": "message",
                    "role": "assistant",
                    "content": [
                        { "type": "output_text", "text": "function f(r) {", "annotations": [] },
                        { "type": "output_text", "text": " return r; }", "annotations": [] }
                    ]
                }
            ]
        });
        assert_eq!(
            OpenAiClient::extract_output_text(&body).unwrap(),
            "function f(r) { return r; }"
        );
    }

    #[test]
    fn non_string_output_text_violates_contract() {
        let body = json!({ "output_text": 42 });
        let err = OpenAiClient::extract_output_text(&body).unwrap_err();
        assert!(matches!(err, DomainError::UpstreamContract(_)));
    }

    #[test]
    fn missing_text_violates_contract() {
        let body = json!({
            "output": [{ "type": "message", "content": [{ "type": "refusal", "refusal": "no" }] }]
        });
        let err = OpenAiClient::extract_output_text(&body).unwrap_err();
        assert!(matches!(err, DomainError::UpstreamContract(_)));

        let err = OpenAiClient::extract_output_text(&json!({})).unwrap_err();
        assert!(matches!(err, DomainError::UpstreamContract(_)));
    }

    #[test]
    fn request_payload_carries_fixed_shape() {
        let request = GenerationRequest::new("system text", "remove sku");
        let payload = serde_json::to_value(ApiRequest::new("gpt-4o", &request)).unwrap();

        assert_eq!(payload["model"], "gpt-4o");
        assert_eq!(payload["input"][0]["role"], "system");
        assert_eq!(payload["input"][0]["content"][0]["type"], "input_text");
        assert_eq!(payload["input"][0]["content"][0]["text"], "system text");
        assert_eq!(payload["input"][1]["role"], "user");
        assert_eq!(payload["input"][1]["content"][0]["text"], "remove sku");
        assert_eq!(payload["text"]["format"]["type"], "text");
        assert_eq!(payload["reasoning"], json!({}));
        assert_eq!(payload["tools"], json!([]));
        assert_eq!(payload["store"], true);
        assert_eq!(payload["max_output_tokens"], 2048);
        assert_eq!(payload["temperature"], 1.0);
    }

    #[test]
    fn url_is_joined_without_double_slash() {
        let client = OpenAiClient::new("key", DEFAULT_MODEL, "https://api.openai.com/");
        assert_eq!(client.url(), "https://api.openai.com/v1/responses");
    }
}
