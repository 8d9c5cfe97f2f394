//! Backfill summary and reporting

use super::outcome::{PageError, RecordError, RecordOutcome, RecordResult};
use crate::core::transform::RecordKind;
use crate::{log_record_error, log_record_outcome};
use std::fmt;
use std::time::Duration;

/// Outcome counts for one record kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindCounts {
    pub created: usize,
    pub skipped_duplicate: usize,
    pub skipped_no_data: usize,
    pub errored: usize,
}

impl KindCounts {
    pub fn total(&self) -> usize {
        self.created + self.skipped_duplicate + self.skipped_no_data + self.errored
    }
}

/// Summary of a backfill run
#[derive(Debug, Clone, Default)]
pub struct BackfillSummary {
    pub activities: KindCounts,
    pub steps: KindCounts,
    pub sleep: KindCounts,

    /// Activities returned by the provider
    pub activities_processed: usize,

    /// Non-empty activity pages fetched
    pub pages_fetched: usize,

    /// Calendar days visited
    pub days_visited: usize,

    /// Set when activity pagination stopped on a fetch error
    pub page_error: Option<PageError>,

    /// Every record that failed, in processing order
    pub errors: Vec<RecordError>,

    /// True when creates were suppressed
    pub dry_run: bool,

    pub duration: Duration,
}

impl BackfillSummary {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn counts(&self, kind: RecordKind) -> &KindCounts {
        match kind {
            RecordKind::Activity => &self.activities,
            RecordKind::Steps => &self.steps,
            RecordKind::Sleep => &self.sleep,
        }
    }

    fn counts_mut(&mut self, kind: RecordKind) -> &mut KindCounts {
        match kind {
            RecordKind::Activity => &mut self.activities,
            RecordKind::Steps => &mut self.steps,
            RecordKind::Sleep => &mut self.sleep,
        }
    }

    /// Counts and logs the result of one record
    pub fn record(&mut self, kind: RecordKind, label: &str, result: RecordResult) {
        match result {
            Ok(outcome) => {
                log_record_outcome!(kind, label, outcome, self.dry_run);
                let counts = self.counts_mut(kind);
                match outcome {
                    RecordOutcome::Created => counts.created += 1,
                    RecordOutcome::SkippedDuplicate => counts.skipped_duplicate += 1,
                    RecordOutcome::SkippedNoData => counts.skipped_no_data += 1,
                }
            }
            Err(error) => {
                log_record_error!(&error);
                self.counts_mut(kind).errored += 1;
                self.errors.push(error);
            }
        }
    }

    /// Pages created across all kinds
    pub fn total_created(&self) -> usize {
        self.activities.created + self.steps.created + self.sleep.created
    }

    /// True when no record and no page errored
    pub fn is_successful(&self) -> bool {
        self.errors.is_empty() && self.page_error.is_none()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        for kind in [RecordKind::Activity, RecordKind::Steps, RecordKind::Sleep] {
            let counts = self.counts(kind);
            tracing::info!(
                kind = %kind,
                created = counts.created,
                skipped_duplicate = counts.skipped_duplicate,
                skipped_no_data = counts.skipped_no_data,
                errored = counts.errored,
                "Backfill totals"
            );
        }

        tracing::info!(
            activities_processed = self.activities_processed,
            pages_fetched = self.pages_fetched,
            days_visited = self.days_visited,
            total_created = self.total_created(),
            dry_run = self.dry_run,
            duration_secs = self.duration.as_secs(),
            "Backfill completed"
        );

        if let Some(page_error) = &self.page_error {
            tracing::warn!(error = %page_error, "Activity pagination aborted");
        }
        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Backfill completed with errors"
            );
        }
    }
}

impl fmt::Display for BackfillSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<10} {:>8} {:>10} {:>8} {:>8}",
            "kind", "created", "duplicate", "no data", "errored"
        )?;
        for kind in [RecordKind::Activity, RecordKind::Steps, RecordKind::Sleep] {
            let c = self.counts(kind);
            writeln!(
                f,
                "{:<10} {:>8} {:>10} {:>8} {:>8}",
                kind.as_str(),
                c.created,
                c.skipped_duplicate,
                c.skipped_no_data,
                c.errored
            )?;
        }
        if let Some(page_error) = &self.page_error {
            writeln!(f, "Pagination aborted: {page_error}")?;
        }
        if self.dry_run {
            writeln!(f, "Dry run: no pages were written")?;
        }
        write!(f, "Finished in {}s", self.duration.as_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sync::outcome::RecordStage;
    use crate::domain::BackfillError;

    fn failure(kind: RecordKind) -> RecordError {
        RecordError::new(
            kind,
            RecordStage::Create,
            "2024-05-02",
            &BackfillError::Transform("rejected".to_string()),
        )
    }

    #[test]
    fn test_summary_creation() {
        let summary = BackfillSummary::new(true);
        assert!(summary.dry_run);
        assert_eq!(summary.total_created(), 0);
        assert!(summary.is_successful());
    }

    #[test]
    fn test_record_counts_per_kind() {
        let mut summary = BackfillSummary::new(false);
        summary.record(RecordKind::Activity, "a", Ok(RecordOutcome::Created));
        summary.record(RecordKind::Activity, "b", Ok(RecordOutcome::SkippedDuplicate));
        summary.record(RecordKind::Sleep, "c", Ok(RecordOutcome::SkippedNoData));
        summary.record(RecordKind::Steps, "d", Err(failure(RecordKind::Steps)));

        assert_eq!(
            summary.activities,
            KindCounts {
                created: 1,
                skipped_duplicate: 1,
                ..Default::default()
            }
        );
        assert_eq!(summary.sleep.skipped_no_data, 1);
        assert_eq!(summary.steps.errored, 1);
        assert_eq!(summary.steps.total(), 1);
        assert_eq!(summary.errors.len(), 1);
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_page_error_marks_run_unsuccessful() {
        let mut summary = BackfillSummary::new(false);
        summary.page_error = Some(PageError {
            start: 0,
            limit: 100,
            processed: 0,
            message: "timeout".to_string(),
        });
        assert!(!summary.is_successful());
        assert!(summary.to_string().contains("Pagination aborted"));
    }

    #[test]
    fn test_display_table() {
        let mut summary = BackfillSummary::new(true).with_duration(Duration::from_secs(42));
        summary.record(RecordKind::Steps, "d", Ok(RecordOutcome::Created));

        let table = summary.to_string();
        assert!(table.contains("steps"));
        assert!(table.contains("Dry run"));
        assert!(table.ends_with("Finished in 42s"));
    }
}
