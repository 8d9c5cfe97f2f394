//! Nightly sleep summary → sleep database
//!
//! Garmin answers the sleep endpoint for every day, including days without any
//! recorded sleep. Those come back with a zero or missing `sleepTimeSeconds`
//! and are treated as "no data": [`transform_sleep`] returns `Ok(None)` and the
//! pipeline moves on without writing.

use super::{DestinationRecord, RecordKind};
use crate::core::format::{format_clock_time, format_duration, format_instant_iso, round_to};
use crate::domain::{
    BackfillError, Icon, Predicate, PropertySet, PropertyValue, QueryFilter, RawSleepSession,
    Result,
};

pub const DATE: &str = "Date";
pub const LONG_DATE: &str = "Long Date";
pub const TOTAL_SLEEP_H: &str = "Total Sleep (h)";
pub const DEEP_SLEEP_H: &str = "Deep Sleep (h)";
pub const LIGHT_SLEEP_H: &str = "Light Sleep (h)";
pub const REM_SLEEP_H: &str = "REM Sleep (h)";
pub const AWAKE_TIME_H: &str = "Awake Time (h)";
pub const TOTAL_SLEEP: &str = "Total Sleep";
pub const LIGHT_SLEEP: &str = "Light Sleep";
pub const DEEP_SLEEP: &str = "Deep Sleep";
pub const REM_SLEEP: &str = "REM Sleep";
pub const RESTING_HR: &str = "Resting HR";
pub const TIMES: &str = "Times";
pub const FULL_DATE_TIME: &str = "Full Date/Time";

/// Emoji set as the icon of sleep pages
pub const SLEEP_ICON: &str = "😴";

/// Bed and wake times of one night
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SleepWindow {
    /// `"HH:MM → HH:MM"` in the local timezone
    pub times: String,
    pub start_iso: String,
    pub end_iso: String,
}

/// One night of sleep in destination shape
#[derive(Debug, Clone, PartialEq)]
pub struct SleepRecord {
    /// `YYYY/MM/DD`, used as the page title
    pub display_date: String,
    /// `YYYY-MM-DD`, the natural key
    pub iso_date: String,
    pub total_hours: f64,
    pub deep_hours: f64,
    pub light_hours: f64,
    pub rem_hours: f64,
    pub awake_hours: f64,
    pub total_text: String,
    pub light_text: String,
    pub deep_text: String,
    pub rem_text: String,
    pub window: Option<SleepWindow>,
    pub resting_heart_rate: i64,
}

fn hours(seconds: f64) -> f64 {
    round_to(seconds / 3600.0, 1)
}

fn duration_text(seconds: f64) -> String {
    format_duration(Some(seconds))
}

/// Maps one sleep response into the destination schema
///
/// Returns `Ok(None)` when no sleep was measured.
///
/// # Errors
///
/// Returns [`BackfillError::Transform`] when sleep was measured but the summary
/// carries no calendar date.
pub fn transform_sleep(raw: &RawSleepSession) -> Result<Option<SleepRecord>> {
    let daily = &raw.daily_sleep;
    if daily.sleep_time_seconds <= 0.0 || !daily.sleep_time_seconds.is_finite() {
        return Ok(None);
    }

    let iso_date = daily
        .calendar_date
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| {
            BackfillError::Transform("sleep summary has no calendar date".to_string())
        })?
        .to_string();

    let start = daily.sleep_start_timestamp_gmt.filter(|ts| *ts != 0);
    let end = daily.sleep_end_timestamp_gmt.filter(|ts| *ts != 0);
    let window = match (format_instant_iso(start), format_instant_iso(end)) {
        (Some(start_iso), Some(end_iso)) => Some(SleepWindow {
            times: format!("{} → {}", format_clock_time(start), format_clock_time(end)),
            start_iso,
            end_iso,
        }),
        _ => None,
    };

    Ok(Some(SleepRecord {
        display_date: iso_date.replace('-', "/"),
        iso_date,
        total_hours: hours(daily.sleep_time_seconds),
        deep_hours: hours(daily.deep_sleep_seconds),
        light_hours: hours(daily.light_sleep_seconds),
        rem_hours: hours(daily.rem_sleep_seconds),
        awake_hours: hours(daily.awake_sleep_seconds),
        total_text: duration_text(daily.sleep_time_seconds),
        light_text: duration_text(daily.light_sleep_seconds),
        deep_text: duration_text(daily.deep_sleep_seconds),
        rem_text: duration_text(daily.rem_sleep_seconds),
        window,
        resting_heart_rate: raw.resting_heart_rate,
    }))
}

impl DestinationRecord for SleepRecord {
    fn kind(&self) -> RecordKind {
        RecordKind::Sleep
    }

    fn natural_key(&self) -> QueryFilter {
        QueryFilter::single(Predicate::date_equals(LONG_DATE, &self.iso_date))
    }

    fn properties(&self) -> PropertySet {
        let mut props = PropertySet::new()
            .with(DATE, PropertyValue::Title(self.display_date.clone()))
            .with(LONG_DATE, PropertyValue::date(&self.iso_date))
            .with(TOTAL_SLEEP_H, PropertyValue::number(self.total_hours))
            .with(DEEP_SLEEP_H, PropertyValue::number(self.deep_hours))
            .with(LIGHT_SLEEP_H, PropertyValue::number(self.light_hours))
            .with(REM_SLEEP_H, PropertyValue::number(self.rem_hours))
            .with(AWAKE_TIME_H, PropertyValue::number(self.awake_hours))
            .with(TOTAL_SLEEP, PropertyValue::RichText(self.total_text.clone()))
            .with(LIGHT_SLEEP, PropertyValue::RichText(self.light_text.clone()))
            .with(DEEP_SLEEP, PropertyValue::RichText(self.deep_text.clone()))
            .with(REM_SLEEP, PropertyValue::RichText(self.rem_text.clone()))
            .with(
                RESTING_HR,
                PropertyValue::number(self.resting_heart_rate as f64),
            );

        if let Some(window) = &self.window {
            props.insert(TIMES, PropertyValue::RichText(window.times.clone()));
            props.insert(
                FULL_DATE_TIME,
                PropertyValue::date_range(&window.start_iso, &window.end_iso),
            );
        }

        props
    }

    fn icon(&self) -> Option<Icon> {
        Some(Icon::Emoji(SLEEP_ICON.to_string()))
    }

    fn label(&self) -> String {
        self.display_date.clone()
    }
}
