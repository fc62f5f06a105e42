//! Data Analyst Agent - Main Entry Point

use analyst_common::init_logging;
use analyst_config::ConfigLoader;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, overriding the configuration
    #[arg(short, long)]
    log_level: Option<String>,

    /// Port to listen on, overriding the configuration
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;

    init_logging(config.logging.logging_config())?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        films_url = %config.scrape.films_url,
        "Starting data analyst agent"
    );

    analyst_server::serve(config, analyst_server::shutdown_signal()).await?;
    Ok(())
}
