use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use strutscan::cli::Cli;
use strutscan::config::Config;
use strutscan::core::Engine;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!("Starting strutscan v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::resolve(&cli)?;
    let engine = Engine::new(config)?;
    engine.execute()?;
    Ok(())
}
