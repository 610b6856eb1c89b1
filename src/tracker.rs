//! Tracker operations over user settings
//!
//! Recording a log never mutates shared state. The caller receives the settings
//! value to persist when the log starts a new period.

use serde::Serialize;

use crate::dates::days_since;
use crate::types::{DayLog, UserSettings};

/// Minimum days after the last period start before flow counts as a new period
pub const MIN_NEW_CYCLE_GAP_DAYS: i64 = 21;

/// Result of recording a day log
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordOutcome {
    /// Settings to persist, when the log starts a new period
    pub settings_update: Option<UserSettings>,
}

impl RecordOutcome {
    pub fn starts_period(&self) -> bool {
        self.settings_update.is_some()
    }
}

/// Decide whether `log` moves the last period start forward
pub fn record_day_log(settings: &UserSettings, log: &DayLog) -> RecordOutcome {
    if !log.has_flow() {
        return RecordOutcome {
            settings_update: None,
        };
    }

    let starts_period = match settings.last_period_date {
        None => true,
        Some(last) => days_since(last, log.date) >= MIN_NEW_CYCLE_GAP_DAYS,
    };

    let settings_update = starts_period.then(|| {
        tracing::debug!(date = %log.date, "log starts a new period");
        UserSettings {
            last_period_date: Some(log.date),
            ..settings.clone()
        }
    });

    RecordOutcome { settings_update }
}

/// Settings after a data reset
pub fn reset_settings() -> UserSettings {
    UserSettings::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FlowIntensity;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn settings_from(last: Option<NaiveDate>) -> UserSettings {
        UserSettings {
            last_period_date: last,
            avg_cycle_length: 30,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_flow_never_updates() {
        let log = DayLog::new(date(2024, 5, 1));
        assert!(!record_day_log(&settings_from(None), &log).starts_period());
    }

    #[test]
    fn test_first_flow_sets_last_period() {
        let log = DayLog::new(date(2024, 5, 1)).with_flow(FlowIntensity::Light);
        let outcome = record_day_log(&settings_from(None), &log);

        let updated = outcome.settings_update.unwrap();
        assert_eq!(updated.last_period_date, Some(date(2024, 5, 1)));
        assert_eq!(updated.avg_cycle_length, 30);
    }

    #[test]
    fn test_gap_threshold() {
        let settings = settings_from(Some(date(2024, 5, 1)));

        let log = DayLog::new(date(2024, 5, 21)).with_flow(FlowIntensity::Medium);
        assert!(!record_day_log(&settings, &log).starts_period());

        let log = DayLog::new(date(2024, 5, 22)).with_flow(FlowIntensity::Medium);
        assert_eq!(
            record_day_log(&settings, &log)
                .settings_update
                .and_then(|s| s.last_period_date),
            Some(date(2024, 5, 22))
        );
    }

    #[test]
    fn test_earlier_flow_is_ignored() {
        let settings = settings_from(Some(date(2024, 5, 1)));
        let log = DayLog::new(date(2024, 3, 1)).with_flow(FlowIntensity::Heavy);
        assert!(!record_day_log(&settings, &log).starts_period());
    }

    #[test]
    fn test_reset() {
        assert_eq!(reset_settings(), UserSettings::default());
    }
}
