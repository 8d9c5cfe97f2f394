//! Subscriber setup
//!
//! Human-readable lines go to the console. With `[logging] local_enabled`, the
//! same events are also written as JSON to a rolling file so the outcome of
//! every record in a long backfill can be searched afterwards.

use crate::config::LoggingConfig;
use crate::domain::{BackfillError, Result};
use std::str::FromStr;
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// File name prefix of the rolling log
pub const LOG_FILE_NAME: &str = "garmin-backfill.log";

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Keeps the background file writer alive; dropping it flushes pending lines
pub struct LoggingGuard {
    _file_writer: Option<WorkerGuard>,
}

/// Installs the global subscriber
///
/// `RUST_LOG`, when set, replaces the filter derived from `level`.
///
/// # Errors
///
/// Fails on an unknown level, an uncreatable log directory, or when a global
/// subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// use garmin_backfill::logging::init_logging;
/// use garmin_backfill::config::LoggingConfig;
///
/// let config = LoggingConfig::default();
/// let _guard = init_logging("info", &config).expect("Failed to initialize logging");
/// ```
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(level)?;
    let filter = default_filter(level);

    let mut layers: Vec<BoxedLayer<_>> = vec![tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_filter(filter.clone())
        .boxed()];

    let file_writer = match file_layer(config, filter)? {
        Some((layer, guard)) => {
            layers.push(layer);
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| BackfillError::Configuration(format!("Failed to install logger: {e}")))?;

    tracing::debug!(
        level = %level,
        file_enabled = config.local_enabled,
        path = %config.local_path,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _file_writer: file_writer,
    })
}

fn default_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("garmin_backfill={level},reqwest=warn")))
}

/// JSON layer writing to `local_path`, when file logging is enabled
fn file_layer<S>(
    config: &LoggingConfig,
    filter: EnvFilter,
) -> Result<Option<(BoxedLayer<S>, WorkerGuard)>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if !config.local_enabled {
        return Ok(None);
    }

    std::fs::create_dir_all(&config.local_path).map_err(|e| {
        BackfillError::Configuration(format!(
            "Failed to create log directory {}: {e}",
            config.local_path
        ))
    })?;

    let appender = RollingFileAppender::new(
        parse_rotation(&config.local_rotation),
        &config.local_path,
        LOG_FILE_NAME,
    );
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(writer)
        .with_filter(filter)
        .boxed();
    Ok(Some((layer, guard)))
}

fn parse_rotation(rotation: &str) -> Rotation {
    match rotation {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}

fn parse_log_level(level: &str) -> Result<Level> {
    Level::from_str(level.trim()).map_err(|_| {
        BackfillError::Configuration(format!(
            "Invalid log level '{level}', expected trace, debug, info, warn or error"
        ))
    })
}
