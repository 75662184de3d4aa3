//! Boundary to the Claude Messages API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::error::{ApiError, ClientError};

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Body of a `POST /messages` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

/// Content block of a response.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

/// Token accounting reported by the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Body of a successful `POST /messages` response.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    pub content: Vec<ContentBlock>,
    pub usage: TokenUsage,
    pub model: String,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// The completion service the client talks to.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    /// Submit one request, without retries.
    async fn create_message(&self, request: &MessagesRequest)
        -> Result<MessagesResponse, ApiError>;
}

/// [`CompletionApi`] over HTTPS with `reqwest`.
pub struct HttpCompletionApi {
    client: Client,
    base_url: String,
    api_key: String,
    api_version: String,
}

impl HttpCompletionApi {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        api_version: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ClientError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;
        let base_url: String = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            api_version: api_version.into(),
        })
    }

    /// Pull the message out of an error body, falling back to the raw text.
    fn error_message(body: &str) -> String {
        serde_json::from_str::<ErrorEnvelope>(body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| body.trim().to_string())
    }
}

#[async_trait]
impl CompletionApi for HttpCompletionApi {
    async fn create_message(
        &self,
        request: &MessagesRequest,
    ) -> Result<MessagesResponse, ApiError> {
        let url = format!("{}/messages", self.base_url);
        debug!(%url, model = %request.model, "Sending messages request");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = Self::error_message(&body);
            let message = if message.is_empty() {
                status.to_string()
            } else {
                message
            };
            return Err(ApiError::new(status.as_u16(), message));
        }

        response
            .json::<MessagesResponse>()
            .await
            .map_err(|e| ApiError::transport(format!("Failed to parse response: {}", e)))
    }
}
