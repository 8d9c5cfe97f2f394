//! Offset-paginated activity backfill
//!
//! The cursor starts at offset 0 and the budget at `total_activities`. Each
//! page asks for `min(batch_size, remaining)` activities; cursor and budget
//! then move by the number actually returned. Pagination ends when the budget
//! is spent or a page comes back empty. A short page is not the end: Garmin
//! sometimes returns fewer entries than asked for in the middle of the history.

use super::outcome::{PageError, RecordError, RecordStage};
use super::pacing::Pacer;
use super::pipeline::RecordWriter;
use super::summary::BackfillSummary;
use crate::adapters::provider::FitnessProvider;
use crate::core::transform::{transform_activity, DestinationRecord, RecordKind};
use crate::domain::{DatabaseId, RawActivity};
use crate::log_page_request;

/// Result of the activity phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityReport {
    /// Activities returned by the provider
    pub processed: usize,
    /// Non-empty pages fetched
    pub pages: usize,
    /// Set when a page fetch failed
    pub aborted: Option<PageError>,
}

/// Drives activity pagination against one destination database
pub struct ActivityBackfill<'a> {
    pub provider: &'a dyn FitnessProvider,
    pub writer: &'a RecordWriter,
    pub pacer: &'a dyn Pacer,
    pub database_id: &'a DatabaseId,
    pub total_activities: usize,
    pub batch_size: usize,
}

impl ActivityBackfill<'_> {
    /// Runs pagination to completion or the first failed page
    pub async fn run(&self, summary: &mut BackfillSummary) -> ActivityReport {
        let mut report = ActivityReport::default();
        let mut start = 0usize;
        let mut remaining = self.total_activities;
        let batch_size = self.batch_size.max(1);

        while remaining > 0 {
            let limit = batch_size.min(remaining);
            log_page_request!(start, limit, remaining);

            let fetched = self.provider.fetch_activities(start, limit).await;
            self.pacer.pause().await;

            let page = match fetched {
                Ok(page) => page,
                Err(e) => {
                    let error = PageError {
                        start,
                        limit,
                        processed: report.processed,
                        message: e.to_string(),
                    };
                    tracing::error!(error = %error, "Activity page fetch failed");
                    report.aborted = Some(error);
                    break;
                }
            };

            if page.is_empty() {
                tracing::info!(start, "No more activity history");
                break;
            }

            report.pages += 1;
            for raw in &page {
                self.sync_activity(raw, summary).await;
            }

            report.processed += page.len();
            start += page.len();
            remaining = remaining.saturating_sub(page.len());
        }

        report
    }

    async fn sync_activity(&self, raw: &RawActivity, summary: &mut BackfillSummary) {
        match transform_activity(raw) {
            Ok(record) => {
                let result = self.writer.write(self.database_id, &record).await;
                summary.record(RecordKind::Activity, &record.label(), result);
            }
            Err(e) => {
                let label = raw.name().to_string();
                let error = RecordError::new(RecordKind::Activity, RecordStage::Transform, &label, &e);
                summary.record(RecordKind::Activity, &label, Err(error));
            }
        }
    }
}
