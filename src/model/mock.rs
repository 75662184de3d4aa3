//! Scripted completion API for tests and offline runs.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::time::Instant;

use super::api::{CompletionApi, ContentBlock, MessagesRequest, MessagesResponse, TokenUsage};
use super::error::ApiError;

enum Scripted {
    Reply(String),
    Raw(MessagesResponse),
    Fail(ApiError),
}

/// Plays back queued outcomes in order and records every request it sees.
///
/// Text replies echo the requested model. Once the queue is drained every call
/// fails without a status code.
#[derive(Default)]
pub struct MockCompletionApi {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<(Instant, MessagesRequest)>>,
}

impl MockCompletionApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful text reply.
    pub fn reply(self, text: impl Into<String>) -> Self {
        self.push(Scripted::Reply(text.into()))
    }

    /// Queue a raw response body.
    pub fn respond(self, response: MessagesResponse) -> Self {
        self.push(Scripted::Raw(response))
    }

    /// Queue a failure.
    pub fn fail(self, error: ApiError) -> Self {
        self.push(Scripted::Fail(error))
    }

    /// Queue the same failure `times` times.
    pub fn fail_times(mut self, error: ApiError, times: usize) -> Self {
        for _ in 0..times {
            self = self.fail(error.clone());
        }
        self
    }

    fn push(self, outcome: Scripted) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(outcome);
        }
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<MessagesRequest> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(_, request)| request.clone()).collect())
            .unwrap_or_default()
    }

    /// Time of each request, on the tokio clock.
    pub fn call_times(&self) -> Vec<Instant> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(at, _)| *at).collect())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }
}

#[async_trait]
impl CompletionApi for MockCompletionApi {
    async fn create_message(
        &self,
        request: &MessagesRequest,
    ) -> Result<MessagesResponse, ApiError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((Instant::now(), request.clone()));
        }

        let next = self
            .script
            .lock()
            .map_err(|_| ApiError::transport("mock script poisoned"))?
            .pop_front();

        match next {
            Some(Scripted::Reply(text)) => Ok(MessagesResponse {
                content: vec![ContentBlock {
                    kind: "text".to_string(),
                    text: Some(text),
                }],
                usage: TokenUsage {
                    input_tokens: 10,
                    output_tokens: 5,
                },
                model: request.model.clone(),
                stop_reason: Some("end_turn".to_string()),
            }),
            Some(Scripted::Raw(response)) => Ok(response),
            Some(Scripted::Fail(error)) => Err(error),
            None => Err(ApiError::transport("no scripted response left")),
        }
    }
}
