//! Run command implementation

use crate::cli::{EXIT_CONFIG, EXIT_LOGIN, EXIT_PARTIAL, EXIT_SUCCESS};
use crate::config::{load_config, BackfillConfig};
use crate::core::sync::{BackfillCoordinator, BackfillSettings};
use crate::domain::SetupError;
use chrono::{Local, NaiveDate};
use clap::Args;

/// Number of record errors listed on the console
const MAX_LISTED_ERRORS: usize = 10;

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Check for duplicates but never create pages
    #[arg(long)]
    pub dry_run: bool,

    /// Exclusive end of the day range (YYYY-MM-DD), defaults to today
    #[arg(long, value_name = "DATE")]
    pub end_date: Option<NaiveDate>,

    /// Override backfill.days_to_backfill
    #[arg(long)]
    pub days: Option<u32>,

    /// Override backfill.total_activities
    #[arg(long)]
    pub total_activities: Option<usize>,
}

impl RunArgs {
    /// Applies command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut BackfillConfig) {
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
        if let Some(days) = self.days {
            tracing::info!(days, "Overriding days_to_backfill from CLI");
            config.backfill.days_to_backfill = days;
        }
        if let Some(total) = self.total_activities {
            tracing::info!(total, "Overriding total_activities from CLI");
            config.backfill.total_activities = total;
        }
    }

    /// Execute the run command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        self.apply_overrides(&mut config);
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("❌ Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
        }

        let settings = BackfillSettings::from_config(&config);
        let today = self.end_date.unwrap_or_else(|| Local::now().date_naive());

        println!(
            "🚀 Starting backfill: {} activities, {} days before {}",
            settings.total_activities, settings.days_to_backfill, today
        );
        if settings.dry_run {
            println!("🔍 DRY RUN MODE - no pages will be written to Notion");
        }

        let coordinator = match BackfillCoordinator::connect(&config, settings).await {
            Ok(coordinator) => coordinator,
            Err(e) => {
                tracing::error!(error = %e, "Setup failed");
                eprintln!("❌ {e}");
                return Ok(setup_exit_code(&e));
            }
        };

        let summary = coordinator.execute(today).await;
        summary.log_summary();

        println!();
        println!("📊 Backfill Summary:");
        println!("{summary}");

        if !summary.errors.is_empty() {
            println!();
            println!("⚠️  Errors encountered:");
            for error in summary.errors.iter().take(MAX_LISTED_ERRORS) {
                println!("  - {error}");
            }
            if summary.errors.len() > MAX_LISTED_ERRORS {
                println!(
                    "  ... and {} more",
                    summary.errors.len() - MAX_LISTED_ERRORS
                );
            }
        }

        if summary.is_successful() {
            println!("✅ Backfill complete!");
            Ok(EXIT_SUCCESS)
        } else {
            println!("⚠️  Backfill completed with errors");
            Ok(EXIT_PARTIAL)
        }
    }
}

/// Maps a setup failure to the process exit code
pub fn setup_exit_code(error: &SetupError) -> i32 {
    match error {
        SetupError::LoginFailed(_) => EXIT_LOGIN,
        SetupError::MissingCredentials(_) | SetupError::InvalidConfiguration(_) => EXIT_CONFIG,
    }
}
