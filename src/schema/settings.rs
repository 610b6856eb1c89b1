//! Settings validation
//!
//! Onboarding and the settings editor only accept declared averages within the
//! supported ranges and a last period that is not in the future.

use chrono::NaiveDate;
use std::ops::RangeInclusive;

use crate::types::UserSettings;

/// Accepted declared cycle lengths (days)
pub const CYCLE_LENGTH_RANGE: RangeInclusive<u32> = 21..=45;

/// Accepted declared period lengths (days)
pub const PERIOD_LENGTH_RANGE: RangeInclusive<u32> = 1..=8;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsValidationError {
    #[error("Cycle length {0} is outside 21-45 days")]
    CycleLengthOutOfRange(u32),

    #[error("Period length {0} is outside 1-8 days")]
    PeriodLengthOutOfRange(u32),

    #[error("Last period date {0} is in the future")]
    LastPeriodInFuture(NaiveDate),
}

impl UserSettings {
    /// Check the settings against the onboarding rules as of `today`
    pub fn validate(&self, today: NaiveDate) -> Result<(), SettingsValidationError> {
        if !CYCLE_LENGTH_RANGE.contains(&self.avg_cycle_length) {
            return Err(SettingsValidationError::CycleLengthOutOfRange(
                self.avg_cycle_length,
            ));
        }

        if !PERIOD_LENGTH_RANGE.contains(&self.avg_period_length) {
            return Err(SettingsValidationError::PeriodLengthOutOfRange(
                self.avg_period_length,
            ));
        }

        match self.last_period_date {
            Some(date) if date > today => Err(SettingsValidationError::LastPeriodInFuture(date)),
            _ => Ok(()),
        }
    }
}
