use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::application::{CompletePromptUseCase, PROMPT_REQUIRED};
use crate::domain::{CompletionResponse, DomainError, ErrorResponse};

pub const BODY_REQUIRED: &str = "Body is required";
pub const BODY_NOT_JSON: &str = "Body must be valid JSON";
pub const COMPLETION_FAILED: &str = "Failed to get completion";

#[derive(Clone)]
pub struct GatewayState {
    complete: Arc<CompletePromptUseCase>,
}

impl GatewayState {
    pub fn new(complete: CompletePromptUseCase) -> Self {
        Self {
            complete: Arc::new(complete),
        }
    }
}

/// Error returned by a gateway route. Only malformed-request messages reach
/// the client; everything else becomes a generic 500.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn completion_failed() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: COMPLETION_FAILED.to_string(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidInput(message) => Self::bad_request(message),
            other => {
                error!("Completion request failed: {other}");
                Self::completion_failed()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/complete", post(complete))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// POST /complete
async fn complete(
    State(state): State<GatewayState>,
    body: Bytes,
) -> Result<Json<CompletionResponse>, ApiError> {
    let prompt = extract_prompt(&body)?;
    let output_text = state.complete.execute(&prompt).await?;
    Ok(Json(CompletionResponse { output_text }))
}

/// Pull a usable `prompt` out of the raw body, before any upstream call.
fn extract_prompt(body: &[u8]) -> Result<String, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::bad_request(BODY_REQUIRED));
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|_| ApiError::bad_request(BODY_NOT_JSON))?;

    match value.get("prompt").and_then(Value::as_str) {
        Some(prompt) if !prompt.trim().is_empty() => Ok(prompt.to_string()),
        _ => Err(ApiError::bad_request(PROMPT_REQUIRED)),
    }
}

/// Bind the gateway on all interfaces at `port` and serve until Ctrl-C.
pub async fn serve(state: GatewayState, port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://localhost:{port}");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
