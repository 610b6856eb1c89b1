//! Date and calendar helpers
//!
//! Pure calendar arithmetic over ISO `YYYY-MM-DD` dates. The string-facing
//! functions parse at the edge and delegate to the `NaiveDate` versions used
//! inside the engine.

use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use std::fmt::Display;

use crate::clock::Clock;
use crate::error::CycleError;
use crate::types::ISO_DATE_FORMAT;

/// Parse an ISO calendar date, strictly `YYYY-MM-DD`
pub fn parse_date(iso: &str) -> Result<NaiveDate, CycleError> {
    let trimmed = iso.trim();
    if !is_iso_shape(trimmed) {
        return Err(CycleError::DateParseError(format!(
            "{iso:?}: expected YYYY-MM-DD"
        )));
    }
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
        .map_err(|e| CycleError::DateParseError(format!("{iso:?}: {e}")))
}

fn is_iso_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Format a calendar date as ISO
pub fn iso(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// ISO calendar date of a timestamp, taken in the timestamp's own timezone.
///
/// Pass a `DateTime<Local>` to get the user's local calendar day.
pub fn format_date<Tz>(datetime: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    iso(datetime.date_naive())
}

/// Offset a date by `days` (may be negative).
///
/// `None` when the result falls outside the representable calendar.
pub fn offset_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::try_days(days)?)
}

/// Absolute number of whole days between two dates
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days().abs()
}

/// Signed number of days from `from` to `to`
pub fn days_since(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// `add_days("2024-01-30", 3) == "2024-02-02"`
pub fn add_days(iso_date: &str, days: i64) -> Result<String, CycleError> {
    offset_days(parse_date(iso_date)?, days)
        .map(iso)
        .ok_or_else(|| CycleError::DateOutOfRange(format!("{iso_date} {days:+} days")))
}

/// Absolute whole-day difference between two ISO dates
pub fn day_diff(a: &str, b: &str) -> Result<i64, CycleError> {
    Ok(days_between(parse_date(a)?, parse_date(b)?))
}

/// True when the date is strictly after the clock's local calendar day
pub fn is_future_date(iso_date: &str, clock: &impl Clock) -> Result<bool, CycleError> {
    Ok(is_future(parse_date(iso_date)?, clock))
}

pub fn is_future(date: NaiveDate, clock: &impl Clock) -> bool {
    date > clock.today()
}
