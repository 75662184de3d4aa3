//! Task helpers built on [`ClaudeClient::complete`].
//!
//! Each helper fills a named template and sends it with a fixed persona as the
//! system prompt. The persona replaces any `system` set in the options.

use super::client::{ClaudeClient, ClaudeResponse, CompletionOptions};
use super::error::ClientError;
use crate::config::prompts::{
    fill_template, CODE_PLACEHOLDER, CODE_REVIEW_SYSTEM_PROMPT, CODE_REVIEW_TEMPLATE,
    DEBUGGING_SYSTEM_PROMPT, DEBUGGING_TEMPLATE, DOCUMENTATION_SYSTEM_PROMPT,
    DOCUMENTATION_TEMPLATE, ERROR_MESSAGES_PLACEHOLDER, ISSUE_PLACEHOLDER,
    PROBLEM_CODE_PLACEHOLDER,
};

impl ClaudeClient {
    /// Ask for a code review of `code`.
    pub async fn review_code(
        &self,
        code: &str,
        options: CompletionOptions,
    ) -> Result<ClaudeResponse, ClientError> {
        let template = self.load_prompt(CODE_REVIEW_TEMPLATE)?;
        let prompt = fill_template(&template, &[(CODE_PLACEHOLDER, code)]);

        self.complete(&prompt, options.with_system(CODE_REVIEW_SYSTEM_PROMPT))
            .await
    }

    /// Ask for documentation of `code`.
    pub async fn generate_docs(
        &self,
        code: &str,
        options: CompletionOptions,
    ) -> Result<ClaudeResponse, ClientError> {
        let template = self.load_prompt(DOCUMENTATION_TEMPLATE)?;
        let prompt = fill_template(&template, &[(CODE_PLACEHOLDER, code)]);

        self.complete(&prompt, options.with_system(DOCUMENTATION_SYSTEM_PROMPT))
            .await
    }

    /// Ask for help debugging `code`.
    ///
    /// # Arguments
    /// * `code` - The failing code.
    /// * `problem_description` - What goes wrong.
    /// * `error_messages` - Captured error output, if any.
    /// * `options` - Remaining per-call overrides.
    pub async fn debug_code(
        &self,
        code: &str,
        problem_description: &str,
        error_messages: Option<&str>,
        options: CompletionOptions,
    ) -> Result<ClaudeResponse, ClientError> {
        let template = self.load_prompt(DEBUGGING_TEMPLATE)?;
        let prompt = fill_template(
            &template,
            &[
                (ISSUE_PLACEHOLDER, problem_description),
                (PROBLEM_CODE_PLACEHOLDER, code),
                (ERROR_MESSAGES_PLACEHOLDER, error_messages.unwrap_or_default()),
            ],
        );

        self.complete(&prompt, options.with_system(DEBUGGING_SYSTEM_PROMPT))
            .await
    }
}
