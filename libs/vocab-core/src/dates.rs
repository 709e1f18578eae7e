//! Date utilities for daily reset hour handling.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, Timelike};

/// Study date for the moment `now`.
///
/// If `now` is before the reset hour, "today" is actually "yesterday" from a
/// study perspective, so late-night reviews count towards the previous day.
pub fn study_date(now: NaiveDateTime, daily_reset_hour: u32) -> NaiveDate {
    if now.hour() < daily_reset_hour {
        (now - Duration::days(1)).date()
    } else {
        now.date()
    }
}

/// Get adjusted "today" in local time based on `daily_reset_hour` (0-23).
pub fn adjusted_today(daily_reset_hour: u32) -> NaiveDate {
    study_date(Local::now().naive_local(), daily_reset_hour)
}
