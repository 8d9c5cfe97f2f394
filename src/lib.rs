// Garmin Backfill - Garmin Connect to Notion backfill tool
// Copyright (c) 2025 Garmin Backfill Contributors
// Licensed under the MIT License

//! # Garmin Backfill
//!
//! One-shot historical backfill of Garmin Connect data into three Notion
//! databases: activities, daily steps and nightly sleep.
//!
//! ## Overview
//!
//! A run signs in to Garmin Connect once, then:
//! - **Pages** through the activity list, newest first, up to a configured total
//! - **Walks** the calendar days before today, oldest first, fetching steps and sleep
//! - **Transforms** every record into Notion page properties
//! - **Guards** each write with a natural-key query so re-runs never duplicate pages
//!
//! Every provider request is followed by a fixed pacing delay. Failures of a
//! single record are logged and counted; the run carries on.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Formatting, transforms, existence guard and the sync drivers
//! - [`adapters`] - Garmin Connect and Notion clients behind collaborator traits
//! - [`domain`] - Raw records, destination properties, identifiers and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use garmin_backfill::config::load_config;
//! use garmin_backfill::core::sync::{BackfillCoordinator, BackfillSettings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("backfill.toml")?;
//!     let settings = BackfillSettings::from_config(&config);
//!
//!     let coordinator = BackfillCoordinator::connect(&config, settings).await?;
//!     let today = chrono::Local::now().date_naive();
//!     let summary = coordinator.execute(today).await;
//!
//!     println!("Created {} pages", summary.total_created());
//!     Ok(())
//! }
//! ```
//!
//! ## Formatting
//!
//! ```rust
//! use garmin_backfill::core::format::{format_duration, format_pace};
//!
//! assert_eq!(format_duration(Some(5400.0)), "1h 30m");
//! assert_eq!(format_pace(Some(2.5)), "6:40 min/km");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
