//! # Clipcast Console Entry Point

use clap::Parser;

use clipcast::cli::{self, Cli};
use clipcast::config::ConfigLoader;
use clipcast::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration from layered env files and variables.
    let config = ConfigLoader::new().load()?;
    telemetry::init_tracing(&config);

    cli::run(cli, config).await
}
