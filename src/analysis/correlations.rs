//! Behavioural correlations
//!
//! Compares the rate of an outcome between two buckets of logged days and
//! turns the comparison into a statement. Every logged day counts, not only
//! days inside reconstructed cycles.

use crate::analysis::AnalysisConfig;
use crate::types::{Correlations, DayLog, Level, LogBook, SexDetail};

pub const SLEEP_WORSENS_MOOD: &str = "insufficient sleep worsens mood";
pub const SLEEP_MOOD_NORMAL: &str = "sleep and mood relationship is normal";
pub const STRESS_LOWERS_LIBIDO: &str = "high stress lowers libido";
pub const STRESS_LIBIDO_UNKNOWN: &str = "not enough data to relate stress and libido";

/// Outcome counter for one bucket of days
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Bucket {
    days: usize,
    hits: usize,
}

impl Bucket {
    fn observe(&mut self, hit: bool) {
        self.days += 1;
        if hit {
            self.hits += 1;
        }
    }

    /// Hit rate; an empty bucket rates zero
    fn rate(&self) -> f64 {
        if self.days == 0 {
            return 0.0;
        }
        self.hits as f64 / self.days as f64
    }
}

/// Compute both correlation statements
pub fn correlate(logs: &LogBook, config: &AnalysisConfig) -> Correlations {
    Correlations {
        sleep_effect: sleep_effect(logs, config).to_string(),
        stress_effect: stress_effect(logs, config).to_string(),
    }
}

/// Bad-mood rate on short-sleep days vs. well-slept days
pub fn sleep_effect(logs: &LogBook, config: &AnalysisConfig) -> &'static str {
    let (short, rested) = split(
        logs.values(),
        |log| Some(log.sleep_hours < config.short_sleep_hours),
        DayLog::has_bad_mood,
    );

    tracing::debug!(
        short_days = short.days,
        short_rate = short.rate(),
        rested_rate = rested.rate(),
        "sleep vs mood"
    );

    if short.days >= config.min_correlation_days && short.rate() > rested.rate() {
        SLEEP_WORSENS_MOOD
    } else {
        SLEEP_MOOD_NORMAL
    }
}

/// Low-libido rate on high-stress days vs. other days with a recorded stress level
pub fn stress_effect(logs: &LogBook, config: &AnalysisConfig) -> &'static str {
    let (stressed, calmer) = split(
        logs.values(),
        |log| log.stress.map(|level| level == Level::High),
        |log| log.sex_details.contains(&SexDetail::LowLibido),
    );

    if stressed.days >= config.min_correlation_days && stressed.rate() > calmer.rate() {
        STRESS_LOWERS_LIBIDO
    } else {
        STRESS_LIBIDO_UNKNOWN
    }
}

/// Partition days by `classify` (`None` skips the day) and count `outcome`
fn split<'a>(
    logs: impl Iterator<Item = &'a DayLog>,
    classify: impl Fn(&DayLog) -> Option<bool>,
    outcome: impl Fn(&DayLog) -> bool,
) -> (Bucket, Bucket) {
    let mut matched = Bucket::default();
    let mut rest = Bucket::default();

    for log in logs {
        match classify(log) {
            Some(true) => matched.observe(outcome(log)),
            Some(false) => rest.observe(outcome(log)),
            None => {}
        }
    }

    (matched, rest)
}
