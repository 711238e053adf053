//! Concierge CLI entry point.

use anyhow::Result;
use clap::Parser;
use concierge::cli::{run_chat, Cli, Output};
use concierge::config::{Credentials, Settings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("concierge={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };
    let credentials = Credentials::from_env();
    tracing::debug!("Loaded {:?}", credentials);

    if let Err(e) = run_chat(cli.model, settings, credentials).await {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    Ok(())
}
