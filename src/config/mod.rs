//! Configuration management
//!
//! Configuration comes from an optional TOML file plus the environment:
//! - `${VAR_NAME}` placeholders inside the file are substituted on load
//! - every section has defaults, and a missing file means "all defaults"
//! - credentials are read from `GARMIN_EMAIL`, `GARMIN_PASSWORD`,
//!   `NOTION_TOKEN`, `NOTION_DB_ID`, `NOTION_STEPS_DB_ID` and
//!   `NOTION_SLEEP_DB_ID`
//! - `BACKFILL_<SECTION>_<KEY>` variables override file values
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [garmin]
//! region = "cn"
//!
//! [notion]
//! token = "${NOTION_TOKEN}"
//!
//! [backfill]
//! total_activities = 1000
//! batch_size = 100
//! days_to_backfill = 180
//! pacing_delay_ms = 1000
//! ```
//!
//! ```rust,no_run
//! use garmin_backfill::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("backfill.toml")?;
//! let credentials = config.credentials()?;
//! println!("Activities go to {}", credentials.databases.activities);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, BackfillConfig, Credentials, DatabaseIds, GarminConfig, GarminRegion,
    LoggingConfig, NotionConfig, RunConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
