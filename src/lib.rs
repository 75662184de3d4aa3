// Copyright 2025 claude-client contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Claude Client
//!
//! A configurable client for the Claude Messages API.
//!
//! The client merges a JSON settings file over built-in defaults, retries
//! transient failures with linear backoff, and offers task helpers that fill
//! prompt templates for code review, documentation and debugging.
//!
//! ## Example
//!
//! ```rust,no_run
//! use claude_client::{ClaudeClient, CompletionOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Reads ANTHROPIC_API_KEY and the default claude-config.json
//!     let client = ClaudeClient::new(None, None)?;
//!
//!     let response = client
//!         .complete(
//!             "Write a function that reverses a string",
//!             CompletionOptions::new().with_temperature(0.3),
//!         )
//!         .await?;
//!
//!     println!("{}", response.content);
//!     println!("Tokens used: {}", response.usage.output_tokens);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod model;
pub mod settings;

pub use model::{
    ApiError, ClaudeClient, ClaudeResponse, ClientError, CompletionApi, CompletionOptions,
    HttpCompletionApi, MockCompletionApi, TokenUsage,
};
pub use settings::ClientSettings;
