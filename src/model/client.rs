//! Claude client with retry handling.

use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::api::{
    CompletionApi, HttpCompletionApi, Message, MessagesRequest, MessagesResponse, TokenUsage,
};
use super::error::ClientError;
use crate::config::prompts;
use crate::settings::ClientSettings;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Per-call overrides for [`ClaudeClient::complete`].
///
/// Unset fields fall back to the client settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionOptions {
    pub system: Option<String>,
    pub context: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl CompletionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Text placed before the prompt, separated by a blank line.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Normalized response from the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaudeResponse {
    pub content: String,
    pub usage: TokenUsage,
    pub model: String,
    pub stop_reason: Option<String>,
}

/// Client for the Claude Messages API.
pub struct ClaudeClient {
    settings: ClientSettings,
    api: Arc<dyn CompletionApi>,
    /// Unset means `<config-dir>/prompts`, resolved on each template load.
    prompts_dir: Option<PathBuf>,
}

impl ClaudeClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `api_key` - API key; falls back to `ANTHROPIC_API_KEY`.
    /// * `config_path` - Settings file; falls back to the default location.
    pub fn new(api_key: Option<String>, config_path: Option<&Path>) -> Result<Self, ClientError> {
        let api_key = api_key
            .filter(|key| !key.is_empty())
            .or_else(|| env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty()))
            .ok_or_else(|| ClientError::Configuration("Anthropic API key is required".into()))?;

        let settings = ClientSettings::load(config_path)?;
        Self::from_settings(api_key, settings)
    }

    /// Create a new client from in-memory settings.
    pub fn from_settings(
        api_key: impl Into<String>,
        settings: ClientSettings,
    ) -> Result<Self, ClientError> {
        settings.validate()?;

        let timeout = Duration::try_from_secs_f64(settings.timeout).map_err(|e| {
            ClientError::Configuration(format!("timeout {} is unusable: {}", settings.timeout, e))
        })?;
        let api = HttpCompletionApi::new(
            settings.base_url.clone(),
            api_key,
            settings.api_version.clone(),
            timeout,
        )?;

        Ok(Self {
            settings,
            api: Arc::new(api),
            prompts_dir: None,
        })
    }

    /// Use a different completion API.
    pub fn with_api(mut self, api: Arc<dyn CompletionApi>) -> Self {
        self.api = api;
        self
    }

    /// Load templates from `dir` instead of the config directory.
    pub fn with_prompts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.prompts_dir = Some(dir.into());
        self
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn prompts_dir(&self) -> PathBuf {
        self.prompts_dir
            .clone()
            .unwrap_or_else(ClientSettings::prompts_dir)
    }

    /// Send a completion request.
    ///
    /// # Arguments
    /// * `prompt` - The main prompt text. Must not be empty.
    /// * `options` - Per-call overrides.
    pub async fn complete(
        &self,
        prompt: &str,
        options: CompletionOptions,
    ) -> Result<ClaudeResponse, ClientError> {
        let request = self.build_request(prompt, &options)?;
        self.send_with_retry(&request).await
    }

    /// Resolve `options` against the settings into a request body.
    pub fn build_request(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<MessagesRequest, ClientError> {
        if prompt.is_empty() {
            return Err(ClientError::Validation("Prompt is required".into()));
        }

        let content = match options.context.as_deref().filter(|c| !c.is_empty()) {
            Some(context) => format!("{}\n\n{}", context, prompt),
            None => prompt.to_string(),
        };

        let model = options
            .model
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| self.settings.model.clone());
        let max_tokens = options.max_tokens.unwrap_or(self.settings.max_tokens);
        let temperature = options.temperature.unwrap_or(self.settings.temperature);
        let system = options
            .system
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| self.settings.system_prompt.clone().filter(|s| !s.is_empty()));

        if max_tokens == 0 {
            return Err(ClientError::Validation("max_tokens must be positive".into()));
        }
        if !(0.0..=1.0).contains(&temperature) {
            return Err(ClientError::Validation(format!(
                "temperature must be within [0, 1], got {}",
                temperature
            )));
        }

        Ok(MessagesRequest {
            model,
            max_tokens,
            temperature,
            messages: vec![Message::user(content)],
            system,
        })
    }

    /// Submit `request`, retrying transient failures.
    ///
    /// Attempt `n` that fails with a retryable status waits `retry_delay * n`
    /// seconds before the next one, up to `retry_attempts` calls in total.
    pub async fn send_with_retry(
        &self,
        request: &MessagesRequest,
    ) -> Result<ClaudeResponse, ClientError> {
        let mut attempt: u32 = 1;

        loop {
            match self.api.create_message(request).await {
                Ok(response) => {
                    debug!(attempt, model = %response.model, "Request succeeded");
                    return Self::normalize(response);
                }
                Err(e) if e.is_retryable() && attempt < self.settings.retry_attempts => {
                    let delay = self.backoff(attempt)?;
                    warn!(
                        "Request failed (attempt {}/{}): {}; retrying in {:.1}s",
                        attempt,
                        self.settings.retry_attempts,
                        e,
                        delay.as_secs_f64()
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    debug!(attempt, status = ?e.status, "Request failed, giving up");
                    return Err(e.into());
                }
            }
        }
    }

    /// Wait before retrying after failed attempt `attempt`.
    fn backoff(&self, attempt: u32) -> Result<Duration, ClientError> {
        let secs = self.settings.retry_delay * f64::from(attempt);
        Duration::try_from_secs_f64(secs).map_err(|e| {
            ClientError::Configuration(format!("retry delay of {}s is unusable: {}", secs, e))
        })
    }

    fn normalize(response: MessagesResponse) -> Result<ClaudeResponse, ClientError> {
        let first = response
            .content
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::Upstream("API error: response has no content".into()))?;
        let content = first.text.ok_or_else(|| {
            ClientError::Upstream(format!(
                "API error: first content block is '{}', not text",
                first.kind
            ))
        })?;

        Ok(ClaudeResponse {
            content,
            usage: response.usage,
            model: response.model,
            stop_reason: response.stop_reason,
        })
    }

    /// Load a prompt template by name.
    pub fn load_prompt(&self, name: &str) -> Result<String, ClientError> {
        prompts::load_template(&self.prompts_dir(), name)
    }
}
