//! Sync engine
//!
//! - [`activities`] - offset-paginated activity phase
//! - [`calendar`] - per-day steps and sleep phase
//! - [`pipeline`] - guarded record writes shared by both phases
//! - [`pacing`] - pause after every provider call
//! - [`summary`] - per-kind outcome counts
//! - [`coordinator`] - runs both phases in order
//!
//! ```rust,no_run
//! use garmin_backfill::config::load_config;
//! use garmin_backfill::core::sync::{BackfillCoordinator, BackfillSettings};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("backfill.toml")?;
//! let settings = BackfillSettings::from_config(&config);
//! let coordinator = BackfillCoordinator::connect(&config, settings).await?;
//!
//! let summary = coordinator.execute(chrono::Local::now().date_naive()).await;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

pub mod activities;
pub mod calendar;
pub mod coordinator;
pub mod outcome;
pub mod pacing;
pub mod pipeline;
pub mod settings;
pub mod summary;

pub use activities::{ActivityBackfill, ActivityReport};
pub use calendar::{backfill_days, CalendarBackfill};
pub use coordinator::BackfillCoordinator;
pub use outcome::{PageError, RecordError, RecordOutcome, RecordResult, RecordStage};
pub use pacing::{pacer_for, FixedDelayPacer, NoopPacer, Pacer};
pub use pipeline::RecordWriter;
pub use settings::BackfillSettings;
pub use summary::{BackfillSummary, KindCounts};
