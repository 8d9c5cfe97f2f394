//! Run parameters

use crate::config::BackfillConfig;
use std::time::Duration;

/// Immutable parameters of one backfill run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackfillSettings {
    /// Activity budget
    pub total_activities: usize,
    /// Activities per page
    pub batch_size: usize,
    /// Calendar days before today to visit
    pub days_to_backfill: u32,
    /// Pause after every provider call
    pub pacing_delay: Duration,
    /// Run the guard but never create pages
    pub dry_run: bool,
}

impl BackfillSettings {
    pub fn from_config(config: &BackfillConfig) -> Self {
        Self {
            total_activities: config.backfill.total_activities,
            batch_size: config.backfill.batch_size.max(1),
            days_to_backfill: config.backfill.days_to_backfill,
            pacing_delay: Duration::from_millis(config.backfill.pacing_delay_ms),
            dry_run: config.application.dry_run,
        }
    }
}

impl Default for BackfillSettings {
    fn default() -> Self {
        Self::from_config(&BackfillConfig::default())
    }
}
