//! Validate config command implementation

use crate::cli::{EXIT_CONFIG, EXIT_SUCCESS};
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration loaded and valid");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Garmin Region: {:?}", config.garmin.region);
        println!("  Garmin Connect: {}", config.garmin.connect_base_url());
        println!("  Notion API: {}", config.notion.base_url);
        println!("  Total Activities: {}", config.backfill.total_activities);
        println!("  Batch Size: {}", config.backfill.batch_size);
        println!("  Days To Backfill: {}", config.backfill.days_to_backfill);
        println!("  Pacing Delay: {}ms", config.backfill.pacing_delay_ms);
        println!();

        match config.credentials() {
            Ok(credentials) => {
                println!("✅ Credentials present");
                println!("  Garmin Account: {}", credentials.garmin_email);
                println!("  Activities DB: {}", credentials.databases.activities);
                println!("  Steps DB: {}", credentials.databases.steps);
                println!("  Sleep DB: {}", credentials.databases.sleep);
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ {e}");
                Ok(EXIT_CONFIG)
            }
        }
    }
}
