//! Calendar day status
//!
//! Status of a single calendar day for a month view: logged observations take
//! precedence, otherwise the declared cycle is projected forward from the last
//! period start.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::dates::days_since;
use crate::phase::{cycle_day, effective_cycle_length, is_fertile_day, FERTILE_END_DAY};
use crate::prediction::LUTEAL_PHASE_DAYS;
use crate::types::{FlowIntensity, LogBook, UserSettings};

/// Cycle day marked as the projected ovulation day
const OVULATION_CYCLE_DAY: i64 = LUTEAL_PHASE_DAYS;

/// What a calendar cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "intensity", rename_all = "kebab-case")]
pub enum DayStatus {
    /// Logged bleeding
    Period(FlowIntensity),
    /// Logged without bleeding
    Logged,
    PredictedPeriod,
    Ovulation,
    Fertile,
    Luteal,
    Follicular,
}

/// Status of `date`, or `None` when nothing is logged or projectable
pub fn day_status(date: NaiveDate, logs: &LogBook, settings: &UserSettings) -> Option<DayStatus> {
    if let Some(log) = logs.get(&date) {
        return Some(if log.has_flow() {
            DayStatus::Period(log.flow)
        } else {
            DayStatus::Logged
        });
    }

    let last_period = settings.last_period_date?;
    let diff = days_since(last_period, date);
    if diff <= 0 {
        return None;
    }

    let day = cycle_day(diff, effective_cycle_length(settings));
    let status = if day <= settings.avg_period_length as i64 {
        DayStatus::PredictedPeriod
    } else if is_fertile_day(day) {
        if day == OVULATION_CYCLE_DAY {
            DayStatus::Ovulation
        } else {
            DayStatus::Fertile
        }
    } else if day > FERTILE_END_DAY {
        DayStatus::Luteal
    } else {
        DayStatus::Follicular
    };
    Some(status)
}

/// Statuses for every day of a month, in order
pub fn month_statuses(
    year: i32,
    month: u32,
    logs: &LogBook,
    settings: &UserSettings,
) -> Vec<(NaiveDate, Option<DayStatus>)> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(|d| (d, day_status(d, logs, settings)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DayLog;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn settings() -> UserSettings {
        UserSettings {
            last_period_date: Some(date(2024, 3, 1)),
            ..Default::default()
        }
    }

    #[test]
    fn test_logs_take_precedence() {
        let mut logs = LogBook::new();
        logs.insert(
            date(2024, 3, 15),
            DayLog::new(date(2024, 3, 15)).with_flow(FlowIntensity::Heavy),
        );
        logs.insert(date(2024, 3, 16), DayLog::new(date(2024, 3, 16)));

        assert_eq!(
            day_status(date(2024, 3, 15), &logs, &settings()),
            Some(DayStatus::Period(FlowIntensity::Heavy))
        );
        assert_eq!(
            day_status(date(2024, 3, 16), &logs, &settings()),
            Some(DayStatus::Logged)
        );
    }

    #[test]
    fn test_projection() {
        let logs = LogBook::new();
        let s = settings();
        // last period day itself is not projected
        assert_eq!(day_status(date(2024, 3, 1), &logs, &s), None);
        // diff 1 -> cycle day 2
        assert_eq!(day_status(date(2024, 3, 2), &logs, &s), Some(DayStatus::PredictedPeriod));
        // diff 6 -> cycle day 7
        assert_eq!(day_status(date(2024, 3, 7), &logs, &s), Some(DayStatus::Follicular));
        // diff 9 -> cycle day 10
        assert_eq!(day_status(date(2024, 3, 10), &logs, &s), Some(DayStatus::Fertile));
        // diff 13 -> cycle day 14
        assert_eq!(day_status(date(2024, 3, 14), &logs, &s), Some(DayStatus::Ovulation));
        // diff 20 -> cycle day 21
        assert_eq!(day_status(date(2024, 3, 21), &logs, &s), Some(DayStatus::Luteal));
        // diff 28 -> next cycle day 1
        assert_eq!(day_status(date(2024, 3, 29), &logs, &s), Some(DayStatus::PredictedPeriod));
    }

    #[test]
    fn test_unknown_last_period_projects_nothing() {
        let s = UserSettings::default();
        assert_eq!(day_status(date(2024, 3, 10), &LogBook::new(), &s), None);
    }

    #[test]
    fn test_month_statuses_covers_month() {
        let days = month_statuses(2024, 2, &LogBook::new(), &settings());
        assert_eq!(days.len(), 29);
        assert_eq!(days[0].0, date(2024, 2, 1));
        assert!(days.iter().all(|(_, status)| status.is_none()));

        assert!(month_statuses(2024, 13, &LogBook::new(), &settings()).is_empty());
    }
}
