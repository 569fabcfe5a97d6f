//! Negin CLI entry point.

use anyhow::Context;
use clap::Parser;

use negin::cli::{Cli, Commands};
use negin::infrastructure::config::ConfigLoader;
use negin::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli).await {
        negin::cli::handle_error(err, cli.json);
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let log_config = LogConfig::from_settings(&config.logging)?;
    let _logger = LoggerImpl::init(&log_config).context("Failed to initialize logging")?;

    match &cli.command {
        Commands::Serve { host, port } => {
            negin::cli::commands::serve::execute(config, host.clone(), *port).await
        }
        Commands::Search { query } => {
            negin::cli::commands::search::execute(config, query.clone(), cli.json).await
        }
        Commands::Check { names } => {
            negin::cli::commands::check::execute(config, names.clone(), cli.json).await
        }
    }
}
