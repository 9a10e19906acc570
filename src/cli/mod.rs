//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fincache")]
#[command(author, version, about = "Two-tier cache for financial market API responses")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (defaults to `logging.level` from the config)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format (also enabled by `logging.format = "json"`)
    #[arg(long)]
    pub json_logs: bool,

    /// Write logs to this file instead of stdout
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remove every entry from the disk cache
    Clear,
    /// Print a cached value
    Get(GetArgs),
    /// Print the cache key for a prefix and arguments
    Key(KeyArgs),
    /// List record categories and their key fields
    Categories,
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct GetArgs {
    /// Cache key
    pub key: String,

    /// Treat entries older than this many seconds as missing
    /// (defaults to `cache.default_duration_hours` from the config)
    #[arg(long, conflicts_with = "no_expiry")]
    pub max_age_secs: Option<i64>,

    /// Return the entry whatever its age
    #[arg(long)]
    pub no_expiry: bool,
}

#[derive(clap::Args)]
pub struct KeyArgs {
    /// Operation prefix (e.g. prices, financial_metrics)
    pub prefix: String,

    /// Arguments as name=value pairs
    #[arg(value_parser = parse_arg)]
    pub args: Vec<(String, String)>,
}

fn parse_arg(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{}'", s))
}
