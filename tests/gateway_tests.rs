//! `POST /complete` exercised through the axum router with a recording generator.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use transformbot::application::SYSTEM_PROMPT;
use transformbot::{
    build_router, AppConfig, CompletePromptUseCase, Container, DomainError, GatewayState,
    GenerationRequest, TextGenerator,
};

struct RecordingGenerator {
    requests: Mutex<Vec<GenerationRequest>>,
    reply: fn() -> Result<String, DomainError>,
}

impl RecordingGenerator {
    fn new(reply: fn() -> Result<String, DomainError>) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            reply,
        })
    }

    fn calls(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, DomainError> {
        self.requests.lock().unwrap().push(request.clone());
        (self.reply)()
    }

    fn model_name(&self) -> &str {
        "recording"
    }
}

fn router_for(generator: Arc<RecordingGenerator>) -> axum::Router {
    build_router(GatewayState::new(CompletePromptUseCase::new(generator)))
}

async fn post(router: axum::Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/complete")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn valid_prompt_returns_output_text() {
    let generator = RecordingGenerator::new(|| Ok("function f(r){ return r; }".into()));

    let (status, body) =
        post(router_for(generator.clone()), r#"{"prompt":"discount attribute"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["output_text"], "function f(r){ return r; }");
    let calls = generator.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].prompt(), "discount attribute");
    assert_eq!(calls[0].system(), SYSTEM_PROMPT);
}

#[tokio::test]
async fn missing_body_is_a_client_error() {
    let generator = RecordingGenerator::new(|| Ok("unused".into()));

    let (status, body) = post(router_for(generator.clone()), "").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Body is required");
    assert!(generator.calls().is_empty());
}

#[tokio::test]
async fn blank_prompt_is_a_client_error_without_upstream_call() {
    let generator = RecordingGenerator::new(|| Ok("unused".into()));

    for body in [r#"{}"#, r#"{"prompt":""}"#, r#"{"prompt":"   "}"#] {
        let (status, json) = post(router_for(generator.clone()), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(json["error"], "Prompt is required");
    }

    assert!(generator.calls().is_empty());
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let generator = RecordingGenerator::new(|| Ok("unused".into()));

    let (status, body) = post(router_for(generator.clone()), "{prompt:").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Body must be valid JSON");
    assert!(generator.calls().is_empty());
}

#[tokio::test]
async fn upstream_failures_collapse_to_a_generic_error() {
    let failures: [fn() -> Result<String, DomainError>; 2] = [
        || Err(DomainError::transport("OpenAiClient: API returned 401 Unauthorized")),
        || Err(DomainError::upstream_contract("output_text is missing")),
    ];

    for reply in failures {
        let generator = RecordingGenerator::new(reply);
        let (status, body) =
            post(router_for(generator.clone()), r#"{"prompt":"discount attribute"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "Failed to get completion" }));
        assert_eq!(generator.calls().len(), 1);
    }
}

#[tokio::test]
async fn mock_container_serves_completions_offline() {
    let config = AppConfig::from_lookup(|_| None, true).unwrap();
    let container = Container::new(config).unwrap();
    let router = build_router(GatewayState::new(container.complete_use_case().unwrap()));

    let (status, body) = post(router, r#"{"prompt":"remove the sku field"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["output_text"]
        .as_str()
        .unwrap()
        .starts_with("function removeTheSkuField(record)"));
}
