//! Fitness data provider abstraction

use crate::domain::{RawActivity, RawDailySteps, RawSleepSession, Result};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Source of historical fitness records
///
/// `login` must succeed before any fetch is issued. Fetches are plain reads;
/// they are never retried by the caller.
#[async_trait]
pub trait FitnessProvider: Send + Sync {
    /// Establish an authenticated session
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the provider cannot
    /// be reached. Callers treat this as fatal.
    async fn login(&mut self) -> Result<()>;

    /// Activities ordered newest first, starting at offset `start`
    ///
    /// An empty vector means the history is exhausted. Fewer than `limit`
    /// entries does not.
    async fn fetch_activities(&self, start: usize, limit: usize) -> Result<Vec<RawActivity>>;

    /// Daily step summaries for every day in `start..=end`
    async fn fetch_daily_steps(&self, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<RawDailySteps>>;

    /// Sleep summary for the night ending on `date`
    async fn fetch_sleep(&self, date: NaiveDate) -> Result<RawSleepSession>;
}
