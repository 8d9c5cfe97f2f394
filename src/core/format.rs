//! Display formatting for derived destination fields
//!
//! Every function here is total: absent or non-positive input produces the
//! formatted default instead of an error.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Default text for a missing or zero duration
pub const ZERO_DURATION: &str = "0h 0m";

/// Default text for a missing or zero speed
pub const ZERO_PACE: &str = "0:00 min/km";

/// Default text for a missing clock time
pub const UNKNOWN_TIME: &str = "Unknown";

/// Formats seconds as `"Hh Mm"`
///
/// Minutes are floored; hours are whole minutes divided by 60.
///
/// # Examples
///
/// ```
/// use garmin_backfill::core::format::format_duration;
///
/// assert_eq!(format_duration(Some(27_000.0)), "7h 30m");
/// assert_eq!(format_duration(Some(59.0)), "0h 0m");
/// assert_eq!(format_duration(None), "0h 0m");
/// ```
pub fn format_duration(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) if s > 0.0 && s.is_finite() => {
            let minutes = (s / 60.0).floor() as u64;
            format!("{}h {}m", minutes / 60, minutes % 60)
        }
        _ => ZERO_DURATION.to_string(),
    }
}

/// Formats a speed in meters per second as a running pace `"M:SS min/km"`
///
/// Seconds are rounded to the nearest whole second. A fraction that would
/// round up to 60 is shown as 59 so the minute digit always equals the
/// floored pace.
///
/// # Examples
///
/// ```
/// use garmin_backfill::core::format::format_pace;
///
/// assert_eq!(format_pace(Some(2.5)), "6:40 min/km");
/// assert_eq!(format_pace(Some(0.0)), "0:00 min/km");
/// ```
pub fn format_pace(speed_mps: Option<f64>) -> String {
    match speed_mps {
        Some(speed) if speed > 0.0 && speed.is_finite() => {
            let pace = 1000.0 / 60.0 / speed;
            let minutes = pace.floor();
            let seconds = ((pace - minutes) * 60.0).round().min(59.0);
            format!("{}:{:02} min/km", minutes as u64, seconds as u64)
        }
        _ => ZERO_PACE.to_string(),
    }
}

/// Formats epoch milliseconds as `"HH:MM"` in the process-local timezone
///
/// The output depends on the `TZ` of the machine running the backfill. Sleep
/// time ranges in the destination therefore reflect the operator's timezone,
/// not the timezone the watch was in.
pub fn format_clock_time(epoch_ms: Option<i64>) -> String {
    epoch_ms
        .filter(|ms| *ms != 0)
        .and_then(|ms| Local.timestamp_millis_opt(ms).single())
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| UNKNOWN_TIME.to_string())
}

/// Formats epoch milliseconds as a UTC instant `"YYYY-MM-DDTHH:MM:SS.000Z"`
///
/// Sub-second precision is dropped.
///
/// # Examples
///
/// ```
/// use garmin_backfill::core::format::format_instant_iso;
///
/// assert_eq!(
///     format_instant_iso(Some(1_714_687_200_000)).as_deref(),
///     Some("2024-05-02T22:00:00.000Z")
/// );
/// assert_eq!(format_instant_iso(None), None);
/// ```
pub fn format_instant_iso(epoch_ms: Option<i64>) -> Option<String> {
    epoch_ms
        .filter(|ms| *ms != 0)
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S.000Z").to_string())
}

/// Rounds to a fixed number of decimal digits
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Turns a provider enum key into a label: `"trail_running"` → `"Trail Running"`
///
/// Underscores become spaces. A letter is upper-cased when it does not follow
/// another letter and lower-cased otherwise, so `"AEROBIC_BASE"` becomes
/// `"Aerobic Base"`.
pub fn title_case_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut prev_alpha = false;
    for c in key.replace('_', " ").chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Normalizes a Garmin start time to ISO form
///
/// `"2024-05-01 06:00:00"` becomes `"2024-05-01T06:00:00"`; values already
/// containing `T` are returned unchanged.
pub fn normalize_start_time(start: &str) -> String {
    let trimmed = start.trim();
    if trimmed.contains('T') {
        trimmed.to_string()
    } else {
        trimmed.replacen(' ', "T", 1)
    }
}

/// Calendar-day part of an ISO date-time (everything before `T`)
pub fn date_part(iso: &str) -> &str {
    iso.split('T').next().unwrap_or(iso)
}
