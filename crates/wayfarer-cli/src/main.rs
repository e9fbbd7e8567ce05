use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wayfarer_core::{
    AgentNode, BootstrapConfig, LogSeverity, LoggingClient, LoggingObserver, ModelObserver,
    bootstrap, steering_topology,
};

#[derive(Parser)]
#[command(name = "wayfarer")]
#[command(version)]
#[command(about = "Wayfarer — a steering travel assistant")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve credentials and report which logging backend is in use
    Doctor,

    /// Declare the agent tree and print it
    Agents,

    /// Send a one-shot entry through the resolved logging backend
    Emit {
        /// The message to log
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A .env file never overrides variables already set in the environment.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Set up local logging; the remote sink, if any, is resolved per command.
    let filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = BootstrapConfig::from_env();

    match cli.command {
        Commands::Doctor => cmd_doctor(config).await,
        Commands::Agents => cmd_agents(config).await,
        Commands::Emit { message } => cmd_emit(config, &message).await,
    }
}

async fn cmd_doctor(config: BootstrapConfig) -> Result<()> {
    let resolved = bootstrap(config);

    match &resolved.client {
        LoggingClient::Remote(client) => {
            println!("Logging backend: remote (project {})", client.project_id());
        }
        LoggingClient::Local => println!("Logging backend: local"),
    }
    match &resolved.config.credentials_path {
        Some(path) => println!("Credentials file: {}", path.display()),
        None => println!("Credentials file: none (default resolution)"),
    }
    match &resolved.config.model {
        Some(model) => println!("Model: {model}"),
        None => println!("Model: not set (agent declaration will fail)"),
    }
    Ok(())
}

async fn cmd_agents(config: BootstrapConfig) -> Result<()> {
    // Startup order mirrors the daemon: logging first, agents second.
    let resolved = bootstrap(config);
    let client = Arc::new(resolved.client);

    let observers: Vec<Arc<dyn ModelObserver>> =
        vec![Arc::new(LoggingObserver::new(Arc::clone(&client)))];

    let model = resolved
        .config
        .model
        .clone()
        .context("MODEL is not set; add it to the environment or a .env file")?;

    let root = steering_topology(&model, &observers)?;
    wayfarer_core::validate(&root)?;

    print_tree(&root, 0);
    Ok(())
}

fn print_tree(node: &AgentNode, depth: usize) {
    let indent = "  ".repeat(depth);
    println!("{indent}{} — {}", node.name(), node.description());
    for child in node.children() {
        print_tree(child, depth + 1);
    }
}

async fn cmd_emit(config: BootstrapConfig, message: &str) -> Result<()> {
    let resolved = bootstrap(config);
    resolved.client.emit(LogSeverity::Info, message).await;
    info!(
        "entry emitted via {} backend",
        if resolved.client.is_remote() { "remote" } else { "local" }
    );
    Ok(())
}
