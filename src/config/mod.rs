//! Prompt template configuration.

pub mod prompts;

pub use prompts::{fill_template, load_template};
