use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use livescore_feed::api::{self, ApiState};
use livescore_feed::config::{AppConfig, DEFAULT_CONFIG_PATH};
use livescore_feed::data::feed::MatchFeed;
use livescore_feed::monitoring::logger;

#[derive(Debug, Parser)]
#[command(name = "livescore", about = "Live football fixtures with synthetic fallback")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API (default).
    Serve,
    /// Acquire matches once and print them as JSON.
    Fetch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;

    logger::init_logging(&config.monitoring)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run_server(&config).await,
        Command::Fetch => run_fetch(&config).await,
    }
}

async fn run_server(config: &AppConfig) -> Result<()> {
    tracing::info!(
        upstream = %config.upstream.base_url,
        timeout_s = config.upstream.timeout_seconds,
        "Live score API starting"
    );

    let feed = MatchFeed::from_config(config)?;
    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind API server on {addr}"))?;

    api::serve(listener, ApiState::new(feed)).await
}

async fn run_fetch(config: &AppConfig) -> Result<()> {
    let feed = MatchFeed::from_config(config)?;
    let report = feed.acquire_report().await?;

    tracing::info!(
        count = report.matches.len(),
        fallback = report.is_fallback(),
        skipped = report.skipped,
        "Acquisition finished"
    );

    println!("{}", serde_json::to_string_pretty(&report.matches)?);
    Ok(())
}
