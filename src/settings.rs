//! Client configuration.
//!
//! Settings are read once from `claude-config.json` in the config directory and
//! merged over the built-in defaults. The merge is shallow: every key present in
//! the file wins, every missing key keeps its default, unknown keys are ignored.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::model::ClientError;

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "CLAUDE_CLIENT_CONFIG_DIR";

/// File name of the JSON settings file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "claude-config.json";

/// Directory name holding prompt templates inside the config directory.
pub const PROMPTS_DIR_NAME: &str = "prompts";

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 4000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY_SECS: f64 = 1.0;
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const DEFAULT_API_VERSION: &str = "2023-06-01";

/// Settings for the Claude client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Model identifier
    pub model: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature in [0, 1]
    pub temperature: f32,
    /// Request timeout in seconds, passed through to the HTTP client
    pub timeout: f64,
    /// Total number of attempts per request
    pub retry_attempts: u32,
    /// Base delay in seconds; attempt `n` waits `retry_delay * n`
    pub retry_delay: f64,
    /// System prompt used when a call does not supply one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// Messages API root
    pub base_url: String,
    /// Value of the `anthropic-version` header
    pub api_version: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT_SECS,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY_SECS,
            system_prompt: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl ClientSettings {
    /// Get the config directory path.
    ///
    /// `CLAUDE_CLIENT_CONFIG_DIR` wins, then a `config` directory under the
    /// working directory, then the platform config directory.
    pub fn config_dir() -> PathBuf {
        if let Some(dir) = env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return PathBuf::from(dir);
        }

        let local = PathBuf::from("config");
        if local.is_dir() {
            return local;
        }

        directories::ProjectDirs::from("", "", "claude-client")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or(local)
    }

    /// Get the default settings file path.
    pub fn settings_path() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE_NAME)
    }

    /// Get the default prompt template directory.
    pub fn prompts_dir() -> PathBuf {
        Self::config_dir().join(PROMPTS_DIR_NAME)
    }

    /// Load settings from `path`, or from the default settings path.
    ///
    /// A missing file is not an error: a warning is logged and the defaults
    /// are returned. A file that cannot be parsed, or whose values are out of
    /// range, is a configuration error.
    pub fn load(path: Option<&Path>) -> Result<Self, ClientError> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::settings_path);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    "Config file not found at {}, using defaults",
                    path.display()
                );
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ClientError::Configuration(format!(
                    "Failed to read config file {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let settings = Self::from_json(&content).map_err(|e| match e {
            ClientError::Configuration(msg) => {
                ClientError::Configuration(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;

        debug!(path = %path.display(), model = %settings.model, "Loaded client settings");
        Ok(settings)
    }

    /// Parse settings from a JSON object, merged over the defaults.
    pub fn from_json(content: &str) -> Result<Self, ClientError> {
        let settings: Self = serde_json::from_str(content)
            .map_err(|e| ClientError::Configuration(format!("Invalid config file: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.model.trim().is_empty() {
            return Err(ClientError::Configuration("model must not be empty".into()));
        }
        if self.max_tokens == 0 {
            return Err(ClientError::Configuration(
                "max_tokens must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(ClientError::Configuration(format!(
                "temperature must be within [0, 1], got {}",
                self.temperature
            )));
        }
        if !self.timeout.is_finite() || self.timeout < 0.0 {
            return Err(ClientError::Configuration(format!(
                "timeout must be a non-negative number of seconds, got {}",
                self.timeout
            )));
        }
        if !self.retry_delay.is_finite() || self.retry_delay < 0.0 {
            return Err(ClientError::Configuration(format!(
                "retry_delay must be a non-negative number of seconds, got {}",
                self.retry_delay
            )));
        }
        Ok(())
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the Messages API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the default system prompt.
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, attempts: u32, delay_secs: f64) -> Self {
        self.retry_attempts = attempts;
        self.retry_delay = delay_secs;
        self
    }
}
