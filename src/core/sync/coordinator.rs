//! Backfill coordinator - main orchestrator of a run
//!
//! Runs the activity phase to completion (or its first failed page), then the
//! calendar phase, strictly one call at a time.

use super::activities::ActivityBackfill;
use super::calendar::{backfill_days, CalendarBackfill};
use super::pacing::{pacer_for, Pacer};
use super::pipeline::RecordWriter;
use super::settings::BackfillSettings;
use super::summary::BackfillSummary;
use crate::adapters::database::DocumentStore;
use crate::adapters::garmin::GarminClient;
use crate::adapters::notion::NotionClient;
use crate::adapters::provider::FitnessProvider;
use crate::config::{BackfillConfig, DatabaseIds};
use crate::domain::SetupError;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;

/// Backfill coordinator
pub struct BackfillCoordinator {
    provider: Box<dyn FitnessProvider>,
    writer: RecordWriter,
    pacer: Arc<dyn Pacer>,
    databases: DatabaseIds,
    settings: BackfillSettings,
}

impl BackfillCoordinator {
    /// Checks credentials, signs in to Garmin and prepares the Notion client
    ///
    /// # Errors
    ///
    /// Every failure here is fatal: missing credentials, an unusable
    /// configuration, or a rejected login.
    pub async fn connect(
        config: &BackfillConfig,
        settings: BackfillSettings,
    ) -> Result<Self, SetupError> {
        let credentials = config.credentials()?;

        let mut garmin = GarminClient::new(
            &config.garmin,
            credentials.garmin_email.clone(),
            credentials.garmin_password.clone(),
        )
        .map_err(|e| SetupError::InvalidConfiguration(e.to_string()))?;

        garmin
            .login()
            .await
            .map_err(|e| SetupError::LoginFailed(e.to_string()))?;

        let notion = NotionClient::new(&config.notion, &credentials.notion_token)
            .map_err(|e| SetupError::InvalidConfiguration(e.to_string()))?;

        let pacer = pacer_for(settings.pacing_delay);
        Ok(Self::with_components(
            Box::new(garmin),
            Arc::new(notion),
            pacer,
            credentials.databases,
            settings,
        ))
    }

    /// Assembles a coordinator from an already signed-in provider
    pub fn with_components(
        provider: Box<dyn FitnessProvider>,
        store: Arc<dyn DocumentStore>,
        pacer: Arc<dyn Pacer>,
        databases: DatabaseIds,
        settings: BackfillSettings,
    ) -> Self {
        Self {
            provider,
            writer: RecordWriter::new(store, settings.dry_run),
            pacer,
            databases,
            settings,
        }
    }

    /// Runs the backfill with `today` as the exclusive end of the day range
    ///
    /// Never fails: page and record errors are collected in the summary.
    pub async fn execute(&self, today: NaiveDate) -> BackfillSummary {
        let started = Instant::now();
        let mut summary = BackfillSummary::new(self.settings.dry_run);

        tracing::info!(
            total_activities = self.settings.total_activities,
            batch_size = self.settings.batch_size,
            days = self.settings.days_to_backfill,
            dry_run = self.settings.dry_run,
            "Starting backfill"
        );

        let activities = ActivityBackfill {
            provider: self.provider.as_ref(),
            writer: &self.writer,
            pacer: self.pacer.as_ref(),
            database_id: &self.databases.activities,
            total_activities: self.settings.total_activities,
            batch_size: self.settings.batch_size,
        };
        let report = activities.run(&mut summary).await;
        summary.activities_processed = report.processed;
        summary.pages_fetched = report.pages;
        summary.page_error = report.aborted;

        let days = backfill_days(today, self.settings.days_to_backfill);
        tracing::info!(
            days = days.len(),
            first = ?days.first(),
            end = %today,
            "Backfilling steps and sleep"
        );
        let calendar = CalendarBackfill {
            provider: self.provider.as_ref(),
            writer: &self.writer,
            pacer: self.pacer.as_ref(),
            steps_database_id: &self.databases.steps,
            sleep_database_id: &self.databases.sleep,
        };
        let visited = calendar.run(&days, &mut summary).await;
        summary.days_visited = visited;

        summary.with_duration(started.elapsed())
    }
}
