//! Natural-language distance between two instants ("3 minutes ago").

use chrono::{DateTime, Utc};

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const DAYS_PER_MONTH: f64 = 30.4375;
const DAYS_PER_YEAR: f64 = 365.25;

/// Describe `instant` relative to `now`: "in an hour", "5 days ago".
///
/// Identical instants read as "a few seconds ago".
pub fn relative_phrase(instant: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let delta = instant.signed_duration_since(*now);
    let seconds = delta.num_milliseconds().unsigned_abs() as f64 / 1000.0;
    let distance = describe_distance(seconds);

    if delta.num_milliseconds() > 0 {
        format!("in {}", distance)
    } else {
        format!("{} ago", distance)
    }
}

fn describe_distance(seconds: f64) -> String {
    let days = seconds / DAY;

    if seconds < 45.0 {
        "a few seconds".to_string()
    } else if seconds < 90.0 {
        "a minute".to_string()
    } else if seconds < 45.0 * MINUTE {
        plural((seconds / MINUTE).round(), "minute")
    } else if seconds < 90.0 * MINUTE {
        "an hour".to_string()
    } else if seconds < 22.0 * HOUR {
        plural((seconds / HOUR).round(), "hour")
    } else if seconds < 36.0 * HOUR {
        "a day".to_string()
    } else if days < 26.0 {
        plural(days.round(), "day")
    } else if days < 46.0 {
        "a month".to_string()
    } else if days < 320.0 {
        plural((days / DAYS_PER_MONTH).round().max(2.0), "month")
    } else if days < 548.0 {
        "a year".to_string()
    } else {
        plural((days / DAYS_PER_YEAR).round().max(2.0), "year")
    }
}

fn plural(count: f64, unit: &str) -> String {
    format!("{} {}s", count as u64, unit)
}
