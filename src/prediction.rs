//! Next-event prediction
//!
//! Projects the next period start and ovulation from a reference date. The
//! luteal phase is modeled as a fixed 14 days regardless of cycle length.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::offset_days;
use crate::phase::{effective_cycle_length, FERTILE_END_DAY, FERTILE_START_DAY};
use crate::types::UserSettings;

/// Days between ovulation and the next period
pub const LUTEAL_PHASE_DAYS: i64 = 14;

/// Next period start: last start plus one cycle.
///
/// `None` when the date falls outside the representable calendar.
pub fn predict_next_period(last_period: NaiveDate, cycle_length: u32) -> Option<NaiveDate> {
    offset_days(last_period, i64::from(cycle_length))
}

/// Ovulation: a fixed luteal phase before the next period
pub fn predict_ovulation(next_period: NaiveDate) -> Option<NaiveDate> {
    offset_days(next_period, -LUTEAL_PHASE_DAYS)
}

/// Fertile days of the cycle that ends at `next_period`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FertileWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub ovulation: NaiveDate,
}

impl FertileWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start..=self.end).contains(&date)
    }
}

/// Fertile window expressed as calendar dates (cycle days 10-17)
pub fn fertile_window(next_period: NaiveDate, cycle_length: u32) -> Option<FertileWindow> {
    let cycle_start = offset_days(next_period, -i64::from(cycle_length))?;
    Some(FertileWindow {
        start: offset_days(cycle_start, FERTILE_START_DAY - 1)?,
        end: offset_days(cycle_start, FERTILE_END_DAY - 1)?,
        ovulation: predict_ovulation(next_period)?,
    })
}

/// Upcoming events derived from the settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub next_period: NaiveDate,
    pub ovulation: NaiveDate,
    pub fertile_window: FertileWindow,
}

/// Forecast from the last known period start, or from `today` when unknown.
///
/// `None` when a forecast date falls outside the representable calendar.
pub fn upcoming(settings: &UserSettings, today: NaiveDate) -> Option<Forecast> {
    let cycle_length = effective_cycle_length(settings);
    let reference = settings.last_period_date.unwrap_or(today);
    let next_period = predict_next_period(reference, cycle_length)?;

    Some(Forecast {
        next_period,
        ovulation: predict_ovulation(next_period)?,
        fertile_window: fertile_window(next_period, cycle_length)?,
    })
}
