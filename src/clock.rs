//! Clock abstraction
//!
//! "Today" is the only ambient input of the core. Routing it through a trait
//! keeps every date-dependent check deterministic under test.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone};

/// Source of the current local time
pub trait Clock: Send + Sync {
    /// Current time in the local timezone
    fn now_local(&self) -> DateTime<Local>;

    /// Current local calendar day
    fn today(&self) -> NaiveDate {
        self.now_local().date_naive()
    }
}

/// System clock using real time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_local(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock pinned to a fixed local calendar day (noon)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    day: NaiveDate,
}

impl FixedClock {
    pub fn new(day: NaiveDate) -> Self {
        Self { day }
    }
}

impl Clock for FixedClock {
    fn now_local(&self) -> DateTime<Local> {
        let noon = self
            .day
            .and_hms_opt(12, 0, 0)
            .unwrap_or_else(|| self.day.and_time(NaiveTime::default()));
        Local
            .from_local_datetime(&noon)
            .earliest()
            .unwrap_or_else(Local::now)
    }

    fn today(&self) -> NaiveDate {
        self.day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_today() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let clock = FixedClock::new(day);
        assert_eq!(clock.today(), day);
        assert_eq!(clock.now_local().date_naive(), day);
    }
}
