//! Error types for the Claude client.

use thiserror::Error;

/// HTTP statuses that are safe to retry.
pub const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Errors surfaced to callers of the client.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Authentication error: {0}")]
    Authentication(String),
    #[error("Rate limit error: {0}")]
    RateLimit(String),
    #[error("Could not load prompt template: {name} ({path})")]
    TemplateNotFound { name: String, path: String },
    #[error("Upstream error: {0}")]
    Upstream(String),
}

/// Failure reported by the completion API collaborator.
///
/// `status` is the HTTP status when the server answered; transport failures
/// and undecodable bodies carry none.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// An error without a status code.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// Check if the error is transient.
    pub fn is_retryable(&self) -> bool {
        self.status
            .map(|status| RETRYABLE_STATUSES.contains(&status))
            .unwrap_or(false)
    }
}

impl From<ApiError> for ClientError {
    fn from(error: ApiError) -> Self {
        match error.status {
            Some(401) => ClientError::Authentication("Invalid API key".to_string()),
            Some(429) => ClientError::RateLimit("Rate limit exceeded".to_string()),
            Some(400) => ClientError::Validation(format!("Bad request: {}", error)),
            _ => ClientError::Upstream(format!("API error: {}", error)),
        }
    }
}
