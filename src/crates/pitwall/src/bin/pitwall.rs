//! pitwall CLI - chat with an F1 data assistant
//!
//! Main entry point for the pitwall command-line tool.

use anyhow::Context;
use clap::{Parser, Subcommand};
use llm::{ChatModel, ChatRequest, Message};
use pitwall::{AgentConfig, F1ChatAgent, ProtocolKind};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tooling::logging::{format_duration, mask_secret, sanitize_for_logging};

const EXIT_WORDS: [&str; 3] = ["quit", "exit", "bye"];
const CLEAR_COMMAND: &str = "/clear";

#[derive(Parser, Debug)]
#[command(name = "pitwall")]
#[command(about = "Ask questions about Formula 1 sessions, drivers and lap times", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Enable verbose logging (masked key, function calls, result previews)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Gemini model name
    #[arg(long, global = true)]
    model: Option<String>,

    /// Function-calling protocol: text or native
    #[arg(long, global = true)]
    protocol: Option<ProtocolKind>,

    /// Maximum function calls per query
    #[arg(long, global = true)]
    max_function_calls: Option<usize>,

    /// Season used when the model omits a year
    #[arg(long, global = true)]
    default_year: Option<i32>,

    /// Maximum records rendered per function result
    #[arg(long, global = true)]
    max_records: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive chat session (default)
    Chat,

    /// Answer a single question and exit
    Ask {
        /// The question to ask
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Verify that the Gemini API key works
    Check,

    /// Show version information
    Version,
}

impl Cli {
    fn agent_config(&self) -> anyhow::Result<AgentConfig> {
        let mut config = AgentConfig::from_env().context("Failed to load configuration")?;

        if let Some(key) = &self.api_key {
            config = config.with_api_key(key.clone());
        }
        if let Some(model) = &self.model {
            config = config.with_model(model.clone());
        }
        if let Some(protocol) = self.protocol {
            config = config.with_protocol(protocol);
        }
        if let Some(budget) = self.max_function_calls {
            config = config.with_max_function_calls(budget);
        }
        if let Some(year) = self.default_year {
            config = config.with_default_year(year);
        }
        if let Some(cap) = self.max_records {
            config = config.with_max_records(cap);
        }
        if self.verbose {
            config = config.with_verbose(true);
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(rust_log)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Some(Commands::Version) => {
            println!("pitwall {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Commands::Check) => check(cli.agent_config()?).await,
        Some(Commands::Ask { query }) => {
            let mut agent = F1ChatAgent::from_config(cli.agent_config()?)?;
            let answer = agent.process_query(&query.join(" ")).await;
            println!("{}", answer);
            Ok(())
        }
        Some(Commands::Chat) | None => {
            let agent = F1ChatAgent::from_config(cli.agent_config()?)?;
            chat(agent).await
        }
    }
}

/// Interactive read-eval-print loop over stdin.
async fn chat(mut agent: F1ChatAgent) -> anyhow::Result<()> {
    println!("Welcome to pitwall, your F1 data assistant!");
    println!("Ask about sessions, drivers, lap times and more.");
    println!("Example: 'What was George Russell's lap time on lap 8 of Bahrain?'");
    println!("Type '{}' to start over, 'quit' to exit.\n", CLEAR_COMMAND);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"You: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        if input.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&input.to_lowercase().as_str()) {
            break;
        }
        if input == CLEAR_COMMAND {
            agent.reset();
            println!("Conversation cleared.\n");
            continue;
        }

        println!("\nProcessing your query...");
        let answer = agent.process_query(input).await;
        println!("\npitwall: {}\n", answer);
    }

    println!("Thanks for using pitwall!");
    Ok(())
}

/// Send a one-line prompt to the configured model and report the outcome.
async fn check(config: AgentConfig) -> anyhow::Result<()> {
    let model = config.build_model()?;
    if let Some(key) = &config.api_key {
        println!("API key: {}", mask_secret(key));
    }
    println!("Model: {}", model.model_name());

    match model.is_available().await {
        Ok(true) => {}
        Ok(false) => anyhow::bail!("model '{}' was not found", model.model_name()),
        Err(err) => return Err(check_failed(&err)),
    }

    let start = std::time::Instant::now();
    let request = ChatRequest::new(vec![Message::human("Say 'Hello, Gemini is working!'")])
        .with_temperature(config.temperature)
        .with_max_tokens(64);

    let response = model.chat(request).await.map_err(|err| check_failed(&err))?;
    println!("✓ Model responded in {}", format_duration(start.elapsed()));
    println!("  {}", response.text().trim());
    Ok(())
}

fn check_failed(err: &llm::LlmError) -> anyhow::Error {
    eprintln!("✗ {}", pitwall::classify_error(err));
    anyhow::anyhow!(
        "model check failed: {}",
        sanitize_for_logging(&err.to_string())
    )
}
