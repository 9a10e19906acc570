//! Market data cache CLI application.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use fincache_config::{load_config, AppConfig};
use fincache_monitor::setup_logging;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging. Flags override the config file; commands report a
    // broken config themselves.
    let logging = load_config(&cli.config)
        .map(|config| config.logging)
        .unwrap_or_else(|_| AppConfig::default().logging);
    let log_level = cli
        .log_level
        .as_ref()
        .map_or(logging.level.as_str(), |level| level.as_str());
    let json = cli.json_logs || logging.is_json();
    let log_file = cli.log_file.clone().or_else(|| logging.file.clone().map(PathBuf::from));
    let _log_guard = setup_logging(log_level, json, log_file.as_deref());

    // Execute command
    match cli.command {
        Commands::Clear => cli::commands::clear::run(&cli.config).await,
        Commands::Get(args) => cli::commands::get::run(args, &cli.config).await,
        Commands::Key(args) => cli::commands::key::run(args).await,
        Commands::Categories => cli::commands::categories::run().await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config).await,
    }
}
