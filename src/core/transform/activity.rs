//! Activity list entry → activities database

use super::{DestinationRecord, RecordKind};
use crate::core::format::{
    date_part, format_pace, normalize_start_time, round_to, title_case_key,
};
use crate::domain::records::UNKNOWN_TYPE;
use crate::domain::{
    BackfillError, Predicate, PropertySet, PropertyValue, QueryFilter, RawActivity, Result,
};

pub const DATE: &str = "Date";
pub const ACTIVITY_TYPE: &str = "Activity Type";
pub const ACTIVITY_NAME: &str = "Activity Name";
pub const DISTANCE_KM: &str = "Distance (km)";
pub const DURATION_MIN: &str = "Duration (min)";
pub const CALORIES: &str = "Calories";
pub const AVG_PACE: &str = "Avg Pace";
pub const AVG_POWER: &str = "Avg Power";
pub const MAX_POWER: &str = "Max Power";
pub const TRAINING_EFFECT: &str = "Training Effect";
pub const AEROBIC: &str = "Aerobic";
pub const ANAEROBIC: &str = "Anaerobic";
pub const PR: &str = "PR";
pub const FAV: &str = "Fav";

/// Activity in destination shape
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    /// ISO start time, `YYYY-MM-DDTHH:MM:SS`
    pub start_time: String,
    pub activity_type: String,
    pub name: String,
    pub distance_km: f64,
    pub duration_min: f64,
    pub calories: f64,
    pub avg_pace: String,
    pub avg_power: f64,
    pub max_power: f64,
    pub training_effect: String,
    pub aerobic: f64,
    pub anaerobic: f64,
    pub pr: bool,
    pub favorite: bool,
}

impl ActivityRecord {
    /// Day part of the start time
    pub fn date(&self) -> &str {
        date_part(&self.start_time)
    }
}

/// Maps one activity into the destination schema
///
/// # Errors
///
/// Returns [`BackfillError::Transform`] when the activity has no start time,
/// since the start time is part of the natural key.
///
/// # Examples
///
/// ```
/// use garmin_backfill::core::transform::transform_activity;
/// use garmin_backfill::domain::RawActivity;
///
/// let raw = RawActivity {
///     activity_name: Some("Morning Run".to_string()),
///     start_time_gmt: Some("2024-05-01T06:00:00".to_string()),
///     distance: 5000.0,
///     duration: 1800.0,
///     average_speed: 2.5,
///     ..Default::default()
/// };
///
/// let record = transform_activity(&raw).unwrap();
/// assert_eq!(record.distance_km, 5.0);
/// assert_eq!(record.duration_min, 30.0);
/// assert_eq!(record.avg_pace, "6:40 min/km");
/// ```
pub fn transform_activity(raw: &RawActivity) -> Result<ActivityRecord> {
    let start_time = raw
        .start_time_gmt
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(normalize_start_time)
        .ok_or_else(|| {
            BackfillError::Transform(format!("activity '{}' has no start time", raw.name()))
        })?;

    Ok(ActivityRecord {
        start_time,
        activity_type: title_case_key(raw.type_key()),
        name: raw.name().to_string(),
        distance_km: round_to(raw.distance / 1000.0, 2),
        duration_min: round_to(raw.duration / 60.0, 2),
        calories: round_to(raw.calories, 0),
        avg_pace: format_pace(Some(raw.average_speed)),
        avg_power: round_to(raw.avg_power, 1),
        max_power: round_to(raw.max_power, 1),
        training_effect: title_case_key(
            raw.training_effect_label.as_deref().unwrap_or(UNKNOWN_TYPE),
        ),
        aerobic: round_to(raw.aerobic_training_effect, 1),
        anaerobic: round_to(raw.anaerobic_training_effect, 1),
        pr: raw.pr,
        favorite: raw.favorite,
    })
}

impl DestinationRecord for ActivityRecord {
    fn kind(&self) -> RecordKind {
        RecordKind::Activity
    }

    fn natural_key(&self) -> QueryFilter {
        QueryFilter::all(vec![
            Predicate::date_equals(DATE, self.date()),
            Predicate::title_equals(ACTIVITY_NAME, &self.name),
        ])
    }

    fn properties(&self) -> PropertySet {
        PropertySet::new()
            .with(DATE, PropertyValue::date(&self.start_time))
            .with(ACTIVITY_TYPE, PropertyValue::Select(self.activity_type.clone()))
            .with(ACTIVITY_NAME, PropertyValue::Title(self.name.clone()))
            .with(DISTANCE_KM, PropertyValue::number(self.distance_km))
            .with(DURATION_MIN, PropertyValue::number(self.duration_min))
            .with(CALORIES, PropertyValue::number(self.calories))
            .with(AVG_PACE, PropertyValue::RichText(self.avg_pace.clone()))
            .with(AVG_POWER, PropertyValue::number(self.avg_power))
            .with(MAX_POWER, PropertyValue::number(self.max_power))
            .with(
                TRAINING_EFFECT,
                PropertyValue::Select(self.training_effect.clone()),
            )
            .with(AEROBIC, PropertyValue::number(self.aerobic))
            .with(ANAEROBIC, PropertyValue::number(self.anaerobic))
            .with(PR, PropertyValue::Checkbox(self.pr))
            .with(FAV, PropertyValue::Checkbox(self.favorite))
    }

    fn label(&self) -> String {
        format!("{} - {}", self.date(), self.name)
    }
}
