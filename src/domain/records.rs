//! Raw provider records
//!
//! Typed views of the Garmin Connect payloads the backfill consumes. Only the
//! fields that feed the destination schema are modelled; everything else in the
//! payload is ignored. Garmin frequently sends explicit `null` for metrics a
//! device did not record, so numeric fields decode `null` and absence alike to
//! their zero value.

use serde::{Deserialize, Deserializer, Serialize};

/// Name used when Garmin does not report an activity name
pub const UNNAMED_ACTIVITY: &str = "Unnamed Activity";

/// Activity type used when Garmin does not report one
pub const UNKNOWN_TYPE: &str = "Unknown";

/// Decodes `null` the same way as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Activity type block nested inside an activity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityType {
    /// Machine key such as `trail_running` or `lap_swimming`
    #[serde(default)]
    pub type_key: Option<String>,
}

/// One entry of the activity list endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActivity {
    #[serde(default)]
    pub activity_name: Option<String>,

    /// Start time in UTC, usually `YYYY-MM-DD HH:MM:SS`
    #[serde(default, rename = "startTimeGMT")]
    pub start_time_gmt: Option<String>,

    #[serde(default)]
    pub activity_type: Option<ActivityType>,

    /// Meters
    #[serde(default, deserialize_with = "null_as_default")]
    pub distance: f64,

    /// Seconds
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub calories: f64,

    /// Meters per second
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_speed: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub avg_power: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub max_power: f64,

    #[serde(default)]
    pub training_effect_label: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub aerobic_training_effect: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub anaerobic_training_effect: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub pr: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub favorite: bool,
}

impl RawActivity {
    /// Activity name, falling back to [`UNNAMED_ACTIVITY`]
    pub fn name(&self) -> &str {
        self.activity_name.as_deref().unwrap_or(UNNAMED_ACTIVITY)
    }

    /// Activity type key, falling back to [`UNKNOWN_TYPE`]
    pub fn type_key(&self) -> &str {
        self.activity_type
            .as_ref()
            .and_then(|t| t.type_key.as_deref())
            .unwrap_or(UNKNOWN_TYPE)
    }
}

/// One day of the daily steps endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDailySteps {
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub calendar_date: Option<String>,

    #[serde(default)]
    pub total_steps: Option<i64>,

    #[serde(default)]
    pub step_goal: Option<i64>,

    /// Meters
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_distance: f64,
}

/// Nightly summary inside a sleep response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySleepSummary {
    #[serde(default)]
    pub calendar_date: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub sleep_time_seconds: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub deep_sleep_seconds: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub light_sleep_seconds: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub rem_sleep_seconds: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub awake_sleep_seconds: f64,

    /// Epoch milliseconds
    #[serde(default, rename = "sleepStartTimestampGMT")]
    pub sleep_start_timestamp_gmt: Option<i64>,

    /// Epoch milliseconds
    #[serde(default, rename = "sleepEndTimestampGMT")]
    pub sleep_end_timestamp_gmt: Option<i64>,
}

/// Daily sleep response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSleepSession {
    #[serde(default, rename = "dailySleepDTO", deserialize_with = "null_as_default")]
    pub daily_sleep: DailySleepSummary,

    #[serde(default, deserialize_with = "null_as_default")]
    pub resting_heart_rate: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_activity_nulls_decode_to_defaults() {
        let raw: RawActivity = serde_json::from_value(json!({
            "activityName": "Evening Ride",
            "startTimeGMT": "2024-05-01 18:00:00",
            "activityType": {"typeKey": "road_biking"},
            "distance": 25000.0,
            "avgPower": null,
            "pr": null
        }))
        .unwrap();

        assert_eq!(raw.name(), "Evening Ride");
        assert_eq!(raw.type_key(), "road_biking");
        assert_eq!(raw.avg_power, 0.0);
        assert_eq!(raw.max_power, 0.0);
        assert!(!raw.pr);
        assert!(!raw.favorite);
    }

    #[test]
    fn test_activity_name_and_type_fallbacks() {
        let raw: RawActivity = serde_json::from_value(json!({})).unwrap();
        assert_eq!(raw.name(), UNNAMED_ACTIVITY);
        assert_eq!(raw.type_key(), UNKNOWN_TYPE);
        assert!(raw.start_time_gmt.is_none());
    }

    #[test]
    fn test_daily_steps_decodes() {
        let raw: RawDailySteps = serde_json::from_value(json!({
            "calendarDate": "2024-05-02",
            "totalSteps": 11234,
            "stepGoal": 8000,
            "totalDistance": null
        }))
        .unwrap();

        assert_eq!(raw.calendar_date.as_deref(), Some("2024-05-02"));
        assert_eq!(raw.total_steps, Some(11234));
        assert_eq!(raw.total_distance, 0.0);
    }

    #[test]
    fn test_sleep_without_summary_block() {
        let raw: RawSleepSession = serde_json::from_value(json!({
            "dailySleepDTO": null,
            "restingHeartRate": 52
        }))
        .unwrap();

        assert_eq!(raw.daily_sleep.sleep_time_seconds, 0.0);
        assert_eq!(raw.resting_heart_rate, 52);
    }

    #[test]
    fn test_sleep_summary_decodes_timestamps() {
        let raw: RawSleepSession = serde_json::from_value(json!({
            "dailySleepDTO": {
                "calendarDate": "2024-05-03",
                "sleepTimeSeconds": 27000,
                "sleepStartTimestampGMT": 1714687200000_i64,
                "sleepEndTimestampGMT": 1714714200000_i64
            }
        }))
        .unwrap();

        assert_eq!(raw.daily_sleep.sleep_time_seconds, 27000.0);
        assert_eq!(raw.daily_sleep.sleep_start_timestamp_gmt, Some(1714687200000));
        assert_eq!(raw.resting_heart_rate, 0);
    }

    #[test]
    fn test_sleep_seconds_accept_fractional_payloads() {
        let raw: RawSleepSession = serde_json::from_value(json!({
            "dailySleepDTO": {
                "calendarDate": "2024-05-03",
                "sleepTimeSeconds": 27000.0,
                "deepSleepSeconds": 5400.5,
                "awakeSleepSeconds": null
            }
        }))
        .unwrap();

        assert_eq!(raw.daily_sleep.sleep_time_seconds, 27000.0);
        assert_eq!(raw.daily_sleep.deep_sleep_seconds, 5400.5);
        assert_eq!(raw.daily_sleep.awake_sleep_seconds, 0.0);
    }
}
