//! Command-line entry point for the Fyodor moderation bridge.

use anyhow::Context;
use clap::{Parser, Subcommand};
use fyodor_rs::bridge::{JsonLineReactor, run_bridge};
use fyodor_rs::config::{FyodorConfig, discover_config_path};
use fyodor_rs::core::{HandlerContext, MessageHandler, Normalizer, fingerprint};
use fyodor_rs::store::{FileRecordStore, StoreCredentials};
use log::{debug, info};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;

/// Command-line options.
#[derive(Parser)]
#[command(name = "fyodor", version, about = "Flag repeated messages in monitored channels")]
struct Cli {
    /// Path to a fyodor.json5 config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Read platform events as JSON lines and write reactions to stdout
    Run {
        /// Read events from a file instead of stdin
        #[arg(long)]
        events: Option<PathBuf>,
    },
    /// Print the normalized form and fingerprint of a message
    Check {
        /// Raw message text
        text: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fyodor_rs::init_logging();
    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Run { events: None }) {
        Command::Run { events } => run(cli.config, events).await,
        Command::Check { text } => check(&text),
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<FyodorConfig> {
    let path = match path {
        Some(path) => path,
        None => {
            let cwd = std::env::current_dir().context("failed to resolve current directory")?;
            discover_config_path(&cwd).context("please provide a path to a config file")?
        }
    };
    FyodorConfig::load_from_path(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))
}

async fn run(config_path: Option<PathBuf>, events: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    debug!(
        "bot token configured (len={})",
        config.discord_bot_token.len()
    );

    let credentials = StoreCredentials::load(&config.g_credentials_path)
        .context("failed to load store credentials")?;
    let store = Arc::new(
        FileRecordStore::open(config.store.resolve_root(), &credentials)
            .context("failed to open record store")?,
    );
    let reactor = Arc::new(JsonLineReactor::new(std::io::stdout()));
    let context = HandlerContext::new(&config).context("failed to build handler context")?;
    let mut handler = MessageHandler::new(context, store, reactor);

    let stats = match events {
        Some(path) => {
            info!("reading events from {}", path.display());
            let file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("failed to open events file {}", path.display()))?;
            run_bridge(BufReader::new(file), &mut handler).await
        }
        None => {
            info!("reading events from stdin");
            run_bridge(BufReader::new(tokio::io::stdin()), &mut handler).await
        }
    }
    .context("failed to read events")?;
    debug!("bridge finished: {:?}", stats);
    Ok(())
}

fn check(text: &str) -> anyhow::Result<()> {
    let normalizer = Normalizer::new().context("failed to build normalizer")?;
    match normalizer.normalize(text) {
        Some(normalized) => {
            println!("normalized: {normalized}");
            println!("fingerprint: {}", fingerprint(&normalized));
        }
        None => println!("normalized: (empty, message would be ignored)"),
    }
    Ok(())
}
