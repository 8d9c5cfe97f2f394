//! CLI interface and argument parsing

pub mod commands;

use clap::{Parser, Subcommand};

/// Exit code of a run in which no record errored
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code when at least one record or page errored
pub const EXIT_PARTIAL: i32 = 1;
/// Exit code for configuration and credential problems
pub const EXIT_CONFIG: i32 = 2;
/// Exit code when Garmin Connect rejects the login
pub const EXIT_LOGIN: i32 = 4;
/// Exit code for anything else that stops the command
pub const EXIT_FATAL: i32 = 5;

/// Garmin Backfill - Garmin Connect to Notion backfill tool
#[derive(Parser, Debug)]
#[command(name = "garmin-backfill")]
#[command(version, about, long_about = None)]
#[command(author = "Garmin Backfill Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "backfill.toml", env = "BACKFILL_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "BACKFILL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Backfill activities, steps and sleep into Notion
    Run(commands::run::RunArgs),

    /// Validate configuration and credentials without contacting any service
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
