//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - console output filtered by `RUST_LOG` or the configured level
//! - optional JSON file with daily, hourly or no rotation
//! - one structured line per record outcome
//!
//! # Example
//!
//! ```no_run
//! use garmin_backfill::logging::init_logging;
//! use garmin_backfill::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(days = 180, "Backfill started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the outcome of one record
///
/// # Example
///
/// ```no_run
/// use garmin_backfill::log_record_outcome;
/// use garmin_backfill::core::sync::RecordOutcome;
/// use garmin_backfill::core::transform::RecordKind;
///
/// log_record_outcome!(RecordKind::Steps, "2024-05-02", RecordOutcome::Created, false);
/// ```
#[macro_export]
macro_rules! log_record_outcome {
    ($kind:expr, $label:expr, $outcome:expr, $dry_run:expr) => {
        tracing::info!(
            kind = %$kind,
            record = %$label,
            outcome = %$outcome,
            dry_run = $dry_run,
            "Record processed"
        );
    };
}

/// Log a record that failed
///
/// # Example
///
/// ```no_run
/// use garmin_backfill::log_record_error;
/// use garmin_backfill::core::sync::{RecordError, RecordStage};
/// use garmin_backfill::core::transform::RecordKind;
/// use garmin_backfill::domain::BackfillError;
///
/// let err = RecordError::new(
///     RecordKind::Sleep,
///     RecordStage::Fetch,
///     "2024-05-03",
///     &BackfillError::Transform("no date".to_string()),
/// );
/// log_record_error!(&err);
/// ```
#[macro_export]
macro_rules! log_record_error {
    ($error:expr) => {
        tracing::warn!(
            kind = %$error.kind,
            record = %$error.label,
            stage = %$error.stage,
            outcome = "errored",
            error = %$error.message,
            "Record failed"
        );
    };
}

/// Log an activity page request
///
/// # Example
///
/// ```no_run
/// use garmin_backfill::log_page_request;
///
/// log_page_request!(100, 100, 900);
/// ```
#[macro_export]
macro_rules! log_page_request {
    ($start:expr, $limit:expr, $remaining:expr) => {
        tracing::info!(
            start = $start,
            end = $start + $limit,
            remaining = $remaining,
            "Fetching activity page"
        );
    };
}
