//! Guarded record writes
//!
//! Every transformed record goes through [`RecordWriter::write`]: existence
//! check on the natural key, then a create unless a duplicate was found or
//! the run is a dry run.

use super::outcome::{RecordError, RecordOutcome, RecordResult, RecordStage};
use crate::adapters::database::DocumentStore;
use crate::core::guard::{ExistenceGuard, GuardDecision};
use crate::core::transform::DestinationRecord;
use crate::domain::DatabaseId;
use std::sync::Arc;

/// Writes records to the destination through the existence guard
pub struct RecordWriter {
    store: Arc<dyn DocumentStore>,
    guard: ExistenceGuard,
    dry_run: bool,
}

impl RecordWriter {
    pub fn new(store: Arc<dyn DocumentStore>, dry_run: bool) -> Self {
        Self {
            guard: ExistenceGuard::new(store.clone()),
            store,
            dry_run,
        }
    }

    /// Creates `record` in `database_id` unless its natural key is present
    ///
    /// A failed existence query is a record error and no create is attempted.
    /// In dry-run mode the guard still runs and a would-be write is reported
    /// as [`RecordOutcome::Created`].
    pub async fn write<R>(&self, database_id: &DatabaseId, record: &R) -> RecordResult
    where
        R: DestinationRecord + Sync,
    {
        let key = record.natural_key();
        match self.guard.check(database_id, &key).await {
            Ok(GuardDecision::Duplicate(_)) => return Ok(RecordOutcome::SkippedDuplicate),
            Ok(GuardDecision::Proceed) => {}
            Err(e) => {
                return Err(RecordError::new(
                    record.kind(),
                    RecordStage::Guard,
                    record.label(),
                    &e,
                ))
            }
        }

        if self.dry_run {
            return Ok(RecordOutcome::Created);
        }

        let icon = record.icon();
        match self
            .store
            .create(database_id, &record.properties(), icon.as_ref())
            .await
        {
            Ok(page) => {
                tracing::debug!(page_id = %page.id, record = %record.label(), "Page created");
                Ok(RecordOutcome::Created)
            }
            Err(e) => Err(RecordError::new(
                record.kind(),
                RecordStage::Create,
                record.label(),
                &e,
            )),
        }
    }
}
