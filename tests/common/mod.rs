//! Shared fakes for the integration tests
//!
//! `FakeProvider` serves a scripted Garmin history and records every call.
//! `InMemoryStore` keeps created pages per database and answers natural-key
//! queries against them, so re-runs see their own earlier writes.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use garmin_backfill::adapters::database::{DocumentStore, StoredPage};
use garmin_backfill::adapters::provider::FitnessProvider;
use garmin_backfill::config::DatabaseIds;
use garmin_backfill::core::sync::{BackfillCoordinator, BackfillSettings, Pacer};
use garmin_backfill::domain::{
    ActivityType, BackfillError, Condition, DailySleepSummary, DatabaseId, GarminError, Icon,
    NotionError, PropertySet, PropertyValue, QueryFilter, RawActivity, RawDailySteps,
    RawSleepSession, Result,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One request seen by the fake provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    Activities { start: usize, limit: usize },
    Steps(NaiveDate),
    Sleep(NaiveDate),
}

pub type CallLog = Arc<Mutex<Vec<ProviderCall>>>;

/// Scripted fitness provider
#[derive(Default)]
pub struct FakeProvider {
    activities: Vec<RawActivity>,
    /// Caps the size of consecutive activity responses
    page_caps: Mutex<VecDeque<usize>>,
    failing_pages: HashSet<usize>,
    steps: HashMap<NaiveDate, RawDailySteps>,
    sleep: HashMap<NaiveDate, RawSleepSession>,
    failing_steps: HashSet<NaiveDate>,
    failing_sleep: HashSet<NaiveDate>,
    calls: CallLog,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_activities(mut self, activities: Vec<RawActivity>) -> Self {
        self.activities = activities;
        self
    }

    pub fn with_page_caps(self, caps: Vec<usize>) -> Self {
        *self.page_caps.lock().unwrap() = caps.into();
        self
    }

    pub fn failing_page_at(mut self, start: usize) -> Self {
        self.failing_pages.insert(start);
        self
    }

    pub fn with_steps(mut self, day: NaiveDate, total: i64) -> Self {
        self.steps.insert(day, steps_entry(day, total));
        self
    }

    pub fn with_sleep(mut self, day: NaiveDate, seconds: i64) -> Self {
        self.sleep.insert(day, sleep_session(day, seconds));
        self
    }

    pub fn failing_steps_on(mut self, day: NaiveDate) -> Self {
        self.failing_steps.insert(day);
        self
    }

    pub fn failing_sleep_on(mut self, day: NaiveDate) -> Self {
        self.failing_sleep.insert(day);
        self
    }

    /// Handle on the call log that stays valid after the provider is boxed
    pub fn call_log(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    fn log(&self, call: ProviderCall) {
        self.calls.lock().unwrap().push(call);
    }
}

fn unavailable(what: &str) -> BackfillError {
    GarminError::RequestFailed {
        status: 500,
        message: format!("{what} unavailable"),
    }
    .into()
}

#[async_trait]
impl FitnessProvider for FakeProvider {
    async fn login(&mut self) -> Result<()> {
        Ok(())
    }

    async fn fetch_activities(&self, start: usize, limit: usize) -> Result<Vec<RawActivity>> {
        self.log(ProviderCall::Activities { start, limit });
        if self.failing_pages.contains(&start) {
            return Err(unavailable("activity page"));
        }

        let mut take = limit;
        if let Some(cap) = self.page_caps.lock().unwrap().pop_front() {
            take = take.min(cap);
        }
        Ok(self
            .activities
            .iter()
            .skip(start)
            .take(take)
            .cloned()
            .collect())
    }

    async fn fetch_daily_steps(
        &self,
        start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<RawDailySteps>> {
        self.log(ProviderCall::Steps(start));
        if self.failing_steps.contains(&start) {
            return Err(unavailable("steps"));
        }
        Ok(self.steps.get(&start).cloned().into_iter().collect())
    }

    async fn fetch_sleep(&self, date: NaiveDate) -> Result<RawSleepSession> {
        self.log(ProviderCall::Sleep(date));
        if self.failing_sleep.contains(&date) {
            return Err(unavailable("sleep"));
        }
        Ok(self.sleep.get(&date).cloned().unwrap_or_default())
    }
}

/// A page created in the in-memory store
#[derive(Debug, Clone)]
pub struct CreatedPage {
    pub database_id: String,
    pub properties: PropertySet,
    pub icon: Option<Icon>,
}

/// Destination store that answers queries from its own created pages
#[derive(Default)]
pub struct InMemoryStore {
    pages: Mutex<Vec<CreatedPage>>,
    queries: AtomicUsize,
    failing_create_db: Mutex<Option<String>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes every create in `database_id` fail
    pub fn fail_creates_in(&self, database_id: &str) {
        *self.failing_create_db.lock().unwrap() = Some(database_id.to_string());
    }

    pub fn pages(&self) -> Vec<CreatedPage> {
        self.pages.lock().unwrap().clone()
    }

    pub fn pages_in(&self, database_id: &str) -> Vec<CreatedPage> {
        self.pages()
            .into_iter()
            .filter(|p| p.database_id == database_id)
            .collect()
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

fn matches(properties: &PropertySet, filter: &QueryFilter) -> bool {
    filter.predicates().iter().all(|predicate| {
        match (properties.get(&predicate.property), &predicate.condition) {
            (Some(PropertyValue::Date { start, .. }), Condition::DateEquals(day)) => {
                start.starts_with(day.as_str())
            }
            (Some(PropertyValue::Title(title)), Condition::TitleEquals(text)) => title == text,
            _ => false,
        }
    })
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn query(
        &self,
        database_id: &DatabaseId,
        filter: &QueryFilter,
    ) -> Result<Vec<StoredPage>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let pages = self.pages.lock().unwrap();
        Ok(pages
            .iter()
            .enumerate()
            .filter(|(_, p)| p.database_id == database_id.as_str())
            .filter(|(_, p)| matches(&p.properties, filter))
            .map(|(i, _)| StoredPage::new(format!("page-{i}")))
            .collect())
    }

    async fn create(
        &self,
        database_id: &DatabaseId,
        properties: &PropertySet,
        icon: Option<&Icon>,
    ) -> Result<StoredPage> {
        if self.failing_create_db.lock().unwrap().as_deref() == Some(database_id.as_str()) {
            return Err(NotionError::CreateFailed {
                database_id: database_id.to_string(),
                message: "validation_error: Date is not a property that exists".to_string(),
            }
            .into());
        }

        let mut pages = self.pages.lock().unwrap();
        pages.push(CreatedPage {
            database_id: database_id.to_string(),
            properties: properties.clone(),
            icon: icon.cloned(),
        });
        Ok(StoredPage::new(format!("page-{}", pages.len() - 1)))
    }
}

/// Pacer that only counts its invocations
#[derive(Default)]
pub struct CountingPacer {
    pauses: AtomicUsize,
}

impl CountingPacer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Pacer for CountingPacer {
    async fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }
}

pub const ACTIVITIES_DB: &str = "activities-db";
pub const STEPS_DB: &str = "steps-db";
pub const SLEEP_DB: &str = "sleep-db";

pub fn databases() -> DatabaseIds {
    DatabaseIds {
        activities: DatabaseId::new(ACTIVITIES_DB).unwrap(),
        steps: DatabaseId::new(STEPS_DB).unwrap(),
        sleep: DatabaseId::new(SLEEP_DB).unwrap(),
    }
}

pub fn settings(total_activities: usize, batch_size: usize, days: u32) -> BackfillSettings {
    BackfillSettings {
        total_activities,
        batch_size,
        days_to_backfill: days,
        pacing_delay: Duration::ZERO,
        dry_run: false,
    }
}

pub fn coordinator(
    provider: FakeProvider,
    store: Arc<InMemoryStore>,
    pacer: Arc<CountingPacer>,
    settings: BackfillSettings,
) -> BackfillCoordinator {
    BackfillCoordinator::with_components(Box::new(provider), store, pacer, databases(), settings)
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn activity(name: &str, start: &str) -> RawActivity {
    RawActivity {
        activity_name: Some(name.to_string()),
        start_time_gmt: Some(start.to_string()),
        activity_type: Some(ActivityType {
            type_key: Some("running".to_string()),
        }),
        distance: 5000.0,
        duration: 1800.0,
        average_speed: 2.5,
        ..Default::default()
    }
}

/// `count` distinct activities, one per minute on 2024-05-01
pub fn activity_history(count: usize) -> Vec<RawActivity> {
    (0..count)
        .map(|i| {
            activity(
                &format!("Run {i}"),
                &format!("2024-05-01 {:02}:{:02}:00", i / 60 % 24, i % 60),
            )
        })
        .collect()
}

pub fn steps_entry(day: NaiveDate, total: i64) -> RawDailySteps {
    RawDailySteps {
        calendar_date: Some(day.to_string()),
        total_steps: Some(total),
        step_goal: Some(8000),
        total_distance: 6500.0,
    }
}

pub fn sleep_session(day: NaiveDate, seconds: i64) -> RawSleepSession {
    RawSleepSession {
        daily_sleep: DailySleepSummary {
            calendar_date: Some(day.to_string()),
            sleep_time_seconds: seconds as f64,
            deep_sleep_seconds: seconds as f64 / 4.0,
            light_sleep_seconds: seconds as f64 / 2.0,
            rem_sleep_seconds: seconds as f64 / 4.0,
            awake_sleep_seconds: 600.0,
            sleep_start_timestamp_gmt: Some(1_714_600_800_000),
            sleep_end_timestamp_gmt: Some(1_714_627_800_000),
        },
        resting_heart_rate: 52,
    }
}
