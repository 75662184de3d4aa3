//! Prompt templates and task personas.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::model::ClientError;

/// Placeholder replaced with the code under review or documentation.
pub const CODE_PLACEHOLDER: &str = "[INSERT CODE HERE]";
/// Placeholder for the problem description in the debugging template.
pub const ISSUE_PLACEHOLDER: &str = "[DESCRIBE THE ISSUE]";
/// Placeholder for the failing code in the debugging template.
pub const PROBLEM_CODE_PLACEHOLDER: &str = "[INSERT PROBLEMATIC CODE]";
/// Placeholder for error output in the debugging template.
pub const ERROR_MESSAGES_PLACEHOLDER: &str = "[INSERT ERROR MESSAGES]";

pub const CODE_REVIEW_TEMPLATE: &str = "code-review";
pub const DOCUMENTATION_TEMPLATE: &str = "documentation";
pub const DEBUGGING_TEMPLATE: &str = "debugging";

pub const CODE_REVIEW_SYSTEM_PROMPT: &str =
    "You are a senior software engineer conducting a thorough code review.";
pub const DOCUMENTATION_SYSTEM_PROMPT: &str = "You are a technical documentation specialist.";
pub const DEBUGGING_SYSTEM_PROMPT: &str =
    "You are an expert debugger helping to identify and fix code issues.";

/// Read `<dir>/<name>.md`.
pub fn load_template(dir: &Path, name: &str) -> Result<String, ClientError> {
    let path = dir.join(format!("{}.md", name));
    fs::read_to_string(&path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ClientError::TemplateNotFound {
            name: name.to_string(),
            path: path.display().to_string(),
        },
        _ => ClientError::Configuration(format!(
            "Failed to read prompt template {}: {}",
            path.display(),
            e
        )),
    })
}

/// Replace every occurrence of each placeholder, in order.
pub fn fill_template(template: &str, substitutions: &[(&str, &str)]) -> String {
    substitutions
        .iter()
        .fold(template.to_string(), |text, (placeholder, value)| {
            text.replace(placeholder, value)
        })
}
