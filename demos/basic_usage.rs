//! Basic usage example for Claude Client.

use claude_client::{ClaudeClient, CompletionOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load ANTHROPIC_API_KEY from .env if present
    let _ = dotenvy::dotenv();

    // Initialize tracing for retry warnings
    tracing_subscriber::fmt::init();

    // Settings come from the default claude-config.json, or built-in defaults
    let client = ClaudeClient::new(None, None)?;

    let options = CompletionOptions::new().with_temperature(0.3);
    let response = client
        .complete(
            "Create a Rust function that validates email addresses using a regex",
            options,
        )
        .await?;

    println!("Generated Code:");
    println!("{}", response.content);
    println!("\nTokens used: {}", response.usage.output_tokens);

    Ok(())
}
