//! Calendar-day backfill of steps and sleep
//!
//! Visits every date in `[today - N, today)` oldest first. Steps and sleep run
//! independently for each day: a failure in one never blocks the other or the
//! following days.

use super::outcome::{RecordError, RecordOutcome, RecordStage};
use super::pacing::Pacer;
use super::pipeline::RecordWriter;
use super::summary::BackfillSummary;
use crate::adapters::provider::FitnessProvider;
use crate::core::transform::{transform_sleep, transform_steps, DestinationRecord, RecordKind};
use crate::domain::DatabaseId;
use chrono::{Days, NaiveDate};

/// The `days` dates before `today`, ascending; `today` is excluded
///
/// ```
/// use chrono::NaiveDate;
/// use garmin_backfill::core::sync::backfill_days;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let days = backfill_days(today, 2);
/// assert_eq!(days[0].to_string(), "2024-02-28");
/// assert_eq!(days[1].to_string(), "2024-02-29");
/// ```
pub fn backfill_days(today: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (1..=u64::from(days))
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .collect()
}

/// Drives the per-day steps and sleep pipelines
pub struct CalendarBackfill<'a> {
    pub provider: &'a dyn FitnessProvider,
    pub writer: &'a RecordWriter,
    pub pacer: &'a dyn Pacer,
    pub steps_database_id: &'a DatabaseId,
    pub sleep_database_id: &'a DatabaseId,
}

impl CalendarBackfill<'_> {
    /// Processes every day in order, returning the number of days visited
    pub async fn run(&self, days: &[NaiveDate], summary: &mut BackfillSummary) -> usize {
        for day in days {
            tracing::info!(date = %day, "Checking day");
            self.sync_steps(*day, summary).await;
            self.sync_sleep(*day, summary).await;
        }
        days.len()
    }

    async fn sync_steps(&self, day: NaiveDate, summary: &mut BackfillSummary) {
        let kind = RecordKind::Steps;
        let day_label = day.to_string();

        let fetched = self.provider.fetch_daily_steps(day, day).await;
        self.pacer.pause().await;

        let entries = match fetched {
            Ok(entries) => entries,
            Err(e) => {
                let error = RecordError::new(kind, RecordStage::Fetch, &day_label, &e);
                summary.record(kind, &day_label, Err(error));
                return;
            }
        };

        let Some(entry) = entries.first() else {
            summary.record(kind, &day_label, Ok(RecordOutcome::SkippedNoData));
            return;
        };

        match transform_steps(entry) {
            Ok(record) => {
                let result = self.writer.write(self.steps_database_id, &record).await;
                summary.record(kind, &record.label(), result);
            }
            Err(e) => {
                let error = RecordError::new(kind, RecordStage::Transform, &day_label, &e);
                summary.record(kind, &day_label, Err(error));
            }
        }
    }

    async fn sync_sleep(&self, day: NaiveDate, summary: &mut BackfillSummary) {
        let kind = RecordKind::Sleep;
        let day_label = day.to_string();

        let fetched = self.provider.fetch_sleep(day).await;
        self.pacer.pause().await;

        let session = match fetched {
            Ok(session) => session,
            Err(e) => {
                let error = RecordError::new(kind, RecordStage::Fetch, &day_label, &e);
                summary.record(kind, &day_label, Err(error));
                return;
            }
        };

        // No-data check comes before the existence query
        match transform_sleep(&session) {
            Ok(Some(record)) => {
                let result = self.writer.write(self.sleep_database_id, &record).await;
                summary.record(kind, &record.label(), result);
            }
            Ok(None) => summary.record(kind, &day_label, Ok(RecordOutcome::SkippedNoData)),
            Err(e) => {
                let error = RecordError::new(kind, RecordStage::Transform, &day_label, &e);
                summary.record(kind, &day_label, Err(error));
            }
        }
    }
}
