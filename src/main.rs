//! NewsDaemon - conversational news briefing scheduler
//!
//! CLI entry point for the interactive chat and the one-shot
//! summary/digest commands.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use newsdaemon::cli::{Cli, Command};
use newsdaemon::config::Config;
use newsdaemon::llm;
use newsdaemon::news::HttpNewsStore;
use newsdaemon::summarizer::Summarizer;

fn setup_logging(verbose: bool, config_level: Option<&str>) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("newsdaemon")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Setup tracing subscriber - write to log file, not stdout/stderr,
    // so briefings and prompts stay readable
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        config_level
            .and_then(|s| s.parse().ok())
            .unwrap_or(tracing::Level::INFO)
    };
    let log_file = fs::File::create(log_dir.join("newsdaemon.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The log level can live in the config file, which is only loaded
    // after logging starts, so peek at it first
    let config_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.verbose, config_level.as_deref()).context("Failed to setup logging")?;

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate()?;

    info!(
        "NewsDaemon loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    // Dispatch command
    match cli.command {
        Some(Command::Summary { subject }) => cmd_summary(&config, &subject).await,
        Some(Command::Digest { subject }) => cmd_digest(&config, &subject).await,
        Some(Command::Chat) | None => newsdaemon::repl::run_interactive(&config).await,
    }
}

/// Build a summarizer for the one-shot commands
fn build_summarizer(config: &Config) -> Result<Summarizer> {
    let news = Arc::new(HttpNewsStore::from_config(&config.news).context("Failed to create news client")?);
    let llm_client = llm::create_client(&config.llm).context("Failed to create LLM client")?;
    Ok(Summarizer::new(news, llm_client))
}

/// Print today's summary for a subject
async fn cmd_summary(config: &Config, subject: &str) -> Result<()> {
    let summarizer = build_summarizer(config)?;
    let summary = summarizer.fetch_latest_summary(subject).await;
    println!("{}", summary.text);
    Ok(())
}

/// Print a weekly digest for a subject
async fn cmd_digest(config: &Config, subject: &str) -> Result<()> {
    let summarizer = build_summarizer(config)?;
    let digest = summarizer.fetch_weekly_digest(subject).await;
    println!("{}", digest);
    Ok(())
}
