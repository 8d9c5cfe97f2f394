//! External system integrations
//!
//! - [`provider`] - source abstraction ([`FitnessProvider`](provider::FitnessProvider))
//! - [`garmin`] - Garmin Connect implementation of the source
//! - [`database`] - destination abstraction ([`DocumentStore`](database::DocumentStore))
//! - [`notion`] - Notion implementation of the destination
//!
//! The sync engine only sees the two traits, so tests drive it with in-memory
//! fakes.
//!
//! ```rust,no_run
//! use garmin_backfill::adapters::garmin::GarminClient;
//! use garmin_backfill::adapters::notion::NotionClient;
//! use garmin_backfill::adapters::provider::FitnessProvider;
//! use garmin_backfill::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("backfill.toml")?;
//! let credentials = config.credentials()?;
//!
//! let mut garmin = GarminClient::new(
//!     &config.garmin,
//!     credentials.garmin_email.clone(),
//!     credentials.garmin_password.clone(),
//! )?;
//! garmin.login().await?;
//!
//! let notion = NotionClient::new(&config.notion, &credentials.notion_token)?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod garmin;
pub mod notion;
pub mod provider;
