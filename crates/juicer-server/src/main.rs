//! Juicer server binary.
//!
//! Loads configuration, builds a fresh machine, and serves the
//! operator HTTP API until terminated.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use juicer_core::{JuicerConfig, JuicerMachine};
use juicer_server::server::{ServerConfig, start_server};
use juicer_server::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Operator HTTP API for the juicer simulation.
#[derive(Parser, Debug)]
#[command(name = "juicer-server")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, default_value = "juicer-config.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = JuicerConfig::from_file_or_default(&cli.config)
        .context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with_target(true)
        .init();

    info!(
        tank_capacity_ml = %config.machine.tank_capacity_ml,
        bin_capacity_grams = %config.machine.bin_capacity_grams,
        "juicer-server starting"
    );

    let machine = JuicerMachine::new(&config.machine);
    info!(machine = %machine.id(), "machine built");

    let state = Arc::new(AppState::new(machine).context("failed to register metrics")?);
    let server_config = ServerConfig::from(&config.server);

    start_server(&server_config, state)
        .await
        .context("server failed")?;

    Ok(())
}
