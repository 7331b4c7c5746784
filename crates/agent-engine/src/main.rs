//! Inspect and exercise the prompt-configuration tools without an LLM.
//!
//! # Examples
//!
//! ```sh
//! # Tool definitions as sent to an LLM API
//! agent-engine tools
//!
//! # One tool call, exactly as an agent would make it
//! agent-engine call get_available_strategies --args '{"stage_ids": ["missing_values"]}'
//!
//! # Registry contents and the agent's system prompt
//! agent-engine --config workflow.json registry
//! agent-engine system-prompt
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use agent_engine::{AgentError, WorkflowConfig};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Prompt-configuration tools over the pipeline registry.
#[derive(Parser)]
#[command(name = "agent-engine", version)]
struct Cli {
    /// JSON workflow config. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter (e.g. `debug`, `prompt_engine=trace`). Overrides RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the configured tool definitions as JSON.
    Tools,
    /// Dispatch one tool call and print the observation.
    Call {
        /// Tool name.
        tool: String,
        /// Raw JSON arguments.
        #[arg(long, default_value = "{}")]
        args: String,
    },
    /// Print the registered pipelines, stages and strategies as JSON.
    Registry,
    /// Print the configured system prompt.
    SystemPrompt,
}

fn init_tracing(level: Option<&str>) -> Result<(), AgentError> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|e| AgentError::config(format!("invalid --log-level '{level}': {e}")))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}

async fn run(cli: Cli) -> Result<(), AgentError> {
    let config = match &cli.config {
        Some(path) => WorkflowConfig::from_path(path)?,
        None => WorkflowConfig::default(),
    };
    debug!("Using tools {:?}", config.tool_names);

    match cli.command {
        Command::Tools => {
            let manifest = config.tool_manifest()?;
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        }
        Command::Call { tool, args } => {
            let orchestrator = config.build_orchestrator()?;
            let tools = config.build_tool_set(&orchestrator)?;
            if !tools.contains(&tool) {
                return Err(AgentError::UnknownTool { name: tool });
            }
            println!("{}", tools.execute(&tool, &args).await);
        }
        Command::Registry => {
            let orchestrator = config.build_orchestrator()?;
            println!("{}", serde_json::to_string_pretty(&orchestrator.snapshot())?);
        }
        Command::SystemPrompt => println!("{}", config.system_prompt),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_tracing(cli.log_level.as_deref()) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
