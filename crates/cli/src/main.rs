//! Vigil CLI - mirror an auth backend's current session

mod commands;
mod settings;
mod logging;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use commands::Commands;
use settings::{Overrides, Settings};
use std::path::PathBuf;
use tracing::{Level, error};

#[derive(Parser)]
#[command(name = "vigil")]
#[command(about = "Poll an auth backend for the current session")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "info")]
    log_level: LogLevel,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Configuration file (TOML or YAML)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Auth backend base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Seconds between session checks
    #[arg(long, global = true)]
    interval_secs: Option<u64>,

    /// Bearer token sent with session checks
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.into(), cli.json_logs)?;

    let mut settings = Settings::load(cli.config.as_deref())?;
    settings.apply_overrides(Overrides {
        base_url: cli.base_url,
        interval_secs: cli.interval_secs,
        bearer_token: cli.token,
    });

    if let Err(e) = cli.command.execute(settings).await {
        error!("Command failed: {e}");
        std::process::exit(1);
    }

    Ok(())
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}
