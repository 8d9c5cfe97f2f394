//! Init command implementation
//!
//! Writes a sample configuration file. Credentials stay out of the file:
//! they are read from the environment (or a `.env` file) at run time.

use crate::cli::{EXIT_CONFIG, EXIT_FATAL, EXIT_SUCCESS};
use crate::domain::Result;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "backfill.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Garmin Backfill configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match self.write_sample() {
            Ok(()) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - GARMIN_EMAIL and GARMIN_PASSWORD");
                println!("     - NOTION_TOKEN");
                println!("     - NOTION_DB_ID, NOTION_STEPS_DB_ID and NOTION_SLEEP_DB_ID");
                println!("  3. Validate configuration: garmin-backfill validate-config");
                println!("  4. Preview the backfill: garmin-backfill run --dry-run");
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    fn write_sample(&self) -> Result<()> {
        fs::write(&self.output, Self::sample_config())?;
        Ok(())
    }

    /// Sample configuration with every option and its default
    pub fn sample_config() -> &'static str {
        r#"# Garmin Backfill Configuration File
# Copies historical Garmin Connect data into Notion databases.
#
# Credentials are read from the environment. Values set here are
# overridden by GARMIN_EMAIL, GARMIN_PASSWORD, NOTION_TOKEN, NOTION_DB_ID,
# NOTION_STEPS_DB_ID and NOTION_SLEEP_DB_ID when those are set.
# Any value may also reference the environment as "${VAR_NAME}".

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Check for duplicates but never create pages
dry_run = false

[garmin]
# Account region: "cn" (garmin.cn) or "global" (garmin.com)
region = "cn"

# email = "${GARMIN_EMAIL}"
# password = "${GARMIN_PASSWORD}"

# Request timeout in seconds
timeout_seconds = 30

[notion]
# token = "${NOTION_TOKEN}"
# activities_database_id = "${NOTION_DB_ID}"
# steps_database_id = "${NOTION_STEPS_DB_ID}"
# sleep_database_id = "${NOTION_SLEEP_DB_ID}"

base_url = "https://api.notion.com"
api_version = "2022-06-28"
timeout_seconds = 30

[backfill]
# Maximum number of activities to visit, newest first
total_activities = 1000

# Activities requested per page (1-1000)
batch_size = 100

# Calendar days before today to backfill steps and sleep for
days_to_backfill = 180

# Pause after every Garmin Connect request, in milliseconds
pacing_delay_ms = 1000

[logging]
# JSON log file in addition to the console
local_enabled = false
local_path = "logs"

# Log rotation (daily, hourly or never)
local_rotation = "daily"
"#
    }
}
