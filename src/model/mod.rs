//! Model client module for the Claude Messages API.

mod api;
mod client;
mod error;
mod mock;
mod tasks;

pub use api::{
    CompletionApi, ContentBlock, HttpCompletionApi, Message, MessagesRequest, MessagesResponse,
    TokenUsage,
};
pub use client::{ClaudeClient, ClaudeResponse, CompletionOptions, API_KEY_ENV};
pub use error::{ApiError, ClientError, RETRYABLE_STATUSES};
pub use mock::MockCompletionApi;
