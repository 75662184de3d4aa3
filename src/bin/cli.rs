//! Claude Client - command-line entry point
//!
//! Run with: cargo run --bin claude-client -- complete "Hello"

use anyhow::{bail, Context};
use claude_client::{ClaudeClient, ClaudeResponse, CompletionOptions};
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: claude-client [OPTIONS] <COMMAND> ...

Commands:
  complete <prompt...>                   Free-form completion
  review <file>                          Review the code in <file>
  docs <file>                            Generate documentation for <file>
  debug <file> <description> [errfile]   Help debug the code in <file>

Options:
  --config <path>        Settings file (default: <config-dir>/claude-config.json)
  --model <id>           Model override
  --max-tokens <n>       Max tokens override
  --temperature <t>      Temperature override (0.0-1.0)
  --system <text>        System prompt override
  --context <file>       Prepend the contents of <file> to the prompt
  --json                 Print the full response as JSON
  -h, --help             Show this help";

/// Parsed command line.
#[derive(Debug, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    options: CompletionOptions,
    json: bool,
    command: Vec<String>,
}

fn parse_args(args: &[String]) -> anyhow::Result<Option<CliArgs>> {
    let mut parsed = CliArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .with_context(|| format!("{} requires a value", name))
        };

        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--json" => parsed.json = true,
            "--config" => parsed.config = Some(PathBuf::from(value("--config")?)),
            "--model" => parsed.options.model = Some(value("--model")?),
            "--system" => parsed.options.system = Some(value("--system")?),
            "--max-tokens" => {
                let raw = value("--max-tokens")?;
                parsed.options.max_tokens = Some(
                    raw.parse()
                        .with_context(|| format!("invalid --max-tokens: {}", raw))?,
                );
            }
            "--temperature" => {
                let raw = value("--temperature")?;
                parsed.options.temperature = Some(
                    raw.parse()
                        .with_context(|| format!("invalid --temperature: {}", raw))?,
                );
            }
            "--context" => {
                let path = value("--context")?;
                let context = fs::read_to_string(&path)
                    .with_context(|| format!("failed to read context file {}", path))?;
                parsed.options.context = Some(context);
            }
            flag if flag.starts_with("--") && parsed.command.is_empty() => {
                bail!("unknown option: {}", flag)
            }
            _ => parsed.command.push(arg.clone()),
        }
    }

    if parsed.command.is_empty() {
        return Ok(None);
    }
    Ok(Some(parsed))
}

fn read_file(path: &str) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path))
}

async fn run(client: &ClaudeClient, args: CliArgs) -> anyhow::Result<ClaudeResponse> {
    let options = args.options;
    let response = match args.command[0].as_str() {
        "complete" => {
            let prompt = args.command[1..].join(" ");
            client.complete(&prompt, options).await?
        }
        "review" => {
            let file = args.command.get(1).context("review requires <file>")?;
            client.review_code(&read_file(file)?, options).await?
        }
        "docs" => {
            let file = args.command.get(1).context("docs requires <file>")?;
            client.generate_docs(&read_file(file)?, options).await?
        }
        "debug" => {
            let file = args.command.get(1).context("debug requires <file>")?;
            let description = args
                .command
                .get(2)
                .context("debug requires <description>")?;
            let errors = args.command.get(3).map(|p| read_file(p)).transpose()?;
            client
                .debug_code(&read_file(file)?, description, errors.as_deref(), options)
                .await?
        }
        other => bail!("unknown command: {}\n\n{}", other, USAGE),
    };
    Ok(response)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let argv: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&argv)? {
        Some(args) => args,
        None => {
            println!("{}", USAGE);
            return Ok(());
        }
    };

    let client = ClaudeClient::new(None, args.config.as_deref())?;
    tracing::info!(
        model = %args.options.model.as_deref().unwrap_or(&client.settings().model),
        retries = client.settings().retry_attempts,
        "Sending request"
    );

    let json = args.json;
    let response = run(&client, args).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", response.content);
        println!(
            "\nTokens used: {} in / {} out ({})",
            response.usage.input_tokens, response.usage.output_tokens, response.model
        );
    }

    Ok(())
}
