//! Cycle phase calculation
//!
//! Places a calendar day inside the user's declared cycle. Special tracking
//! modes (pregnancy, postpartum, menopause) short-circuit the cycle model.

use chrono::NaiveDate;

use crate::dates::days_since;
use crate::types::{CyclePhase, Phase, UserGoal, UserSettings};

/// Cycle length assumed when nothing is known
pub const DEFAULT_CYCLE_LENGTH: u32 = 28;

/// First cycle day of the ovulation phase label
pub const OVULATION_START_DAY: i64 = 12;
/// Last cycle day of the ovulation phase label
pub const OVULATION_END_DAY: i64 = 16;
/// First cycle day of the fertile window
pub const FERTILE_START_DAY: i64 = 10;
/// Last cycle day of the fertile window
pub const FERTILE_END_DAY: i64 = 17;

/// Compute the phase for `today` under the given settings
pub fn compute_phase(today: NaiveDate, settings: &UserSettings) -> CyclePhase {
    match settings.goal {
        UserGoal::Pregnancy => {
            let start = settings.last_period_date.unwrap_or(today);
            CyclePhase {
                phase: Phase::Pregnancy,
                day_in_cycle: days_since(start, today) + 1,
                days_until_next_period: 0,
                is_fertile: false,
            }
        }
        UserGoal::Postpartum => inactive(Phase::Postpartum),
        UserGoal::Menopause => inactive(Phase::Menopause),
        UserGoal::Track | UserGoal::Avoid | UserGoal::Conceive => cycle_phase(today, settings),
    }
}

fn inactive(phase: Phase) -> CyclePhase {
    CyclePhase {
        phase,
        day_in_cycle: 0,
        days_until_next_period: 0,
        is_fertile: false,
    }
}

fn cycle_phase(today: NaiveDate, settings: &UserSettings) -> CyclePhase {
    let Some(last_period) = settings.last_period_date else {
        return CyclePhase {
            phase: Phase::Follicular,
            day_in_cycle: 1,
            days_until_next_period: DEFAULT_CYCLE_LENGTH as i64,
            is_fertile: false,
        };
    };

    let day_in_cycle = cycle_day(
        days_since(last_period, today),
        effective_cycle_length(settings),
    );
    let days_until_next_period = effective_cycle_length(settings) as i64 - day_in_cycle;

    CyclePhase {
        phase: phase_for_day(day_in_cycle, settings.avg_period_length),
        day_in_cycle: day_in_cycle.max(1),
        days_until_next_period,
        is_fertile: is_fertile_day(day_in_cycle),
    }
}

/// 1-based cycle day for a signed day offset from the last period start
pub fn cycle_day(days_since_start: i64, cycle_length: u32) -> i64 {
    days_since_start.rem_euclid(cycle_length.max(1) as i64) + 1
}

/// Phase label for a cycle day, first match wins
pub fn phase_for_day(day_in_cycle: i64, period_length: u32) -> Phase {
    if day_in_cycle <= period_length as i64 {
        Phase::Menstruation
    } else if (OVULATION_START_DAY..=OVULATION_END_DAY).contains(&day_in_cycle) {
        Phase::Ovulation
    } else if day_in_cycle > OVULATION_END_DAY {
        Phase::Luteal
    } else {
        Phase::Follicular
    }
}

/// Fertile window, independent of the phase label
pub fn is_fertile_day(day_in_cycle: i64) -> bool {
    (FERTILE_START_DAY..=FERTILE_END_DAY).contains(&day_in_cycle)
}

pub(crate) fn effective_cycle_length(settings: &UserSettings) -> u32 {
    if settings.avg_cycle_length == 0 {
        DEFAULT_CYCLE_LENGTH
    } else {
        settings.avg_cycle_length
    }
}
