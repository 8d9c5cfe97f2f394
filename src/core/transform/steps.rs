//! Daily step summary → steps database

use super::{DestinationRecord, RecordKind};
use crate::core::format::round_to;
use crate::domain::{
    BackfillError, Predicate, PropertySet, PropertyValue, QueryFilter, RawDailySteps, Result,
};

pub const ACTIVITY_TYPE: &str = "Activity Type";
pub const DATE: &str = "Date";
pub const TOTAL_STEPS: &str = "Total Steps";
pub const STEP_GOAL: &str = "Step Goal";
pub const TOTAL_DISTANCE_KM: &str = "Total Distance (km)";

/// Title written on every steps page
pub const STEPS_TITLE: &str = "Walking";

/// One day of steps in destination shape
#[derive(Debug, Clone, PartialEq)]
pub struct StepsRecord {
    /// `YYYY-MM-DD`
    pub date: String,
    pub total_steps: Option<i64>,
    pub step_goal: Option<i64>,
    pub distance_km: f64,
}

/// Maps one daily steps entry into the destination schema
///
/// # Errors
///
/// Returns [`BackfillError::Transform`] when the entry has no calendar date.
pub fn transform_steps(raw: &RawDailySteps) -> Result<StepsRecord> {
    let date = raw
        .calendar_date
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| BackfillError::Transform("steps entry has no calendar date".to_string()))?;

    Ok(StepsRecord {
        date: date.to_string(),
        total_steps: raw.total_steps,
        step_goal: raw.step_goal,
        distance_km: round_to(raw.total_distance / 1000.0, 2),
    })
}

impl DestinationRecord for StepsRecord {
    fn kind(&self) -> RecordKind {
        RecordKind::Steps
    }

    fn natural_key(&self) -> QueryFilter {
        QueryFilter::single(Predicate::date_equals(DATE, &self.date))
    }

    fn properties(&self) -> PropertySet {
        PropertySet::new()
            .with(ACTIVITY_TYPE, PropertyValue::Title(STEPS_TITLE.to_string()))
            .with(DATE, PropertyValue::date(&self.date))
            .with(
                TOTAL_STEPS,
                PropertyValue::Number(self.total_steps.map(|s| s as f64)),
            )
            .with(
                STEP_GOAL,
                PropertyValue::Number(self.step_goal.map(|s| s as f64)),
            )
            .with(TOTAL_DISTANCE_KM, PropertyValue::number(self.distance_km))
    }

    fn label(&self) -> String {
        match self.total_steps {
            Some(steps) => format!("{} - {steps} steps", self.date),
            None => self.date.clone(),
        }
    }
}
