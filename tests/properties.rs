//! Behavioural properties of the public engine API

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use femcycle_core::analysis::stats::prediction_confidence;
use femcycle_core::dates::offset_days;
use femcycle_core::types::{AnomalyType, FlowIntensity, Phase, PredictionConfidence};
use femcycle_core::{
    analyze_cycles, compute_phase, predict_next_period, predict_ovulation, AnalysisConfig, DayLog,
    LogBook, UserSettings,
};

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Calendar date for 1-based day `n` of the test timeline
fn day(n: i64) -> NaiveDate {
    offset_days(epoch(), n - 1).unwrap()
}

fn flow_days(days: impl IntoIterator<Item = i64>) -> LogBook {
    days.into_iter()
        .map(|n| (day(n), DayLog::new(day(n)).with_flow(FlowIntensity::Medium)))
        .collect()
}

/// Five-day periods starting every `length` days, `count` cycles plus a trailing start
fn regular_cycles(length: i64, count: i64) -> LogBook {
    flow_days((0..=count).flat_map(|c| {
        let start = 1 + c * length;
        start..start + 5
    }))
}

fn flow_from(level: u8) -> FlowIntensity {
    FlowIntensity::try_from(level).unwrap_or_default()
}

fn arb_logbook() -> impl Strategy<Value = LogBook> {
    prop::collection::vec((1i64..240, 0u8..=3, 0u8..=10, 0u32..=10), 0..120).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(n, flow, pain, sleep)| {
                let mut log = DayLog::new(day(n))
                    .with_flow(flow_from(flow))
                    .with_sleep(sleep as f64);
                log.pain_level = pain;
                (day(n), log)
            })
            .collect()
    })
}

#[test]
fn segmentation_boundary() {
    let logs = flow_days((1..=5).chain(30..=34));
    let analysis = analyze_cycles(&logs, &UserSettings::default());

    assert_eq!(analysis.history.len(), 1);
    let item = &analysis.history[0];
    assert_eq!(item.start_date, day(1));
    assert_eq!(item.end_date, day(30));
    assert_eq!(item.length, 29);
    assert_eq!(item.period_length, 5);
}

#[test]
fn spotting_is_suppressed() {
    let logs = flow_days([1, 6]);
    let analysis = analyze_cycles(&logs, &UserSettings::default());

    assert!(analysis.history.is_empty());
    assert_eq!(analysis.anomalies.len(), 1);
    assert_eq!(analysis.anomalies[0].kind, AnomalyType::Spotting);
    assert_eq!(analysis.anomalies[0].date, Some(day(1)));
}

#[test]
fn fifteenth_day_is_ovulation() {
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let settings = UserSettings {
        last_period_date: offset_days(today, -14),
        ..Default::default()
    };
    let phase = compute_phase(today, &settings);

    assert_eq!(phase.day_in_cycle, 15);
    assert_eq!(phase.phase, Phase::Ovulation);
    assert!(phase.is_fertile);
    assert_eq!(phase.days_until_next_period, 13);
}

#[test]
fn flow_at_earliest_date_does_not_panic() {
    let logs: LogBook = [NaiveDate::MIN, offset_days(NaiveDate::MIN, 28).unwrap()]
        .into_iter()
        .map(|d| (d, DayLog::new(d).with_flow(FlowIntensity::Heavy)))
        .collect();
    let analysis = analyze_cycles(&logs, &UserSettings::default());

    assert_eq!(analysis.history.len(), 1);
    assert_eq!(analysis.history[0].start_date, NaiveDate::MIN);
}

#[test]
fn empty_history_uses_declared_averages() {
    let settings = UserSettings {
        avg_cycle_length: 32,
        avg_period_length: 6,
        ..Default::default()
    };
    let analysis = analyze_cycles(&LogBook::new(), &settings);

    assert_eq!(analysis.avg_length, 32);
    assert_eq!(analysis.avg_period, 6);
    assert_eq!(analysis.prediction_confidence, PredictionConfidence::Low);
}

#[test]
fn anomaly_thresholds() {
    let kinds = |length| {
        analyze_cycles(&regular_cycles(length, 3), &UserSettings::default())
            .anomalies
            .iter()
            .map(|a| a.kind)
            .collect::<Vec<_>>()
    };

    assert_eq!(kinds(36), vec![AnomalyType::LongCycle]);
    assert_eq!(kinds(20), vec![AnomalyType::ShortCycle]);
    assert!(kinds(21).is_empty());
    assert!(kinds(35).is_empty());
}

proptest! {
    #[test]
    fn analysis_is_idempotent(logs in arb_logbook(), cycle in 21u32..=45, period in 1u32..=8) {
        let settings = UserSettings {
            avg_cycle_length: cycle,
            avg_period_length: period,
            ..Default::default()
        };
        prop_assert_eq!(analyze_cycles(&logs, &settings), analyze_cycles(&logs, &settings));
    }

    #[test]
    fn history_is_most_recent_first(logs in arb_logbook()) {
        let analysis = analyze_cycles(&logs, &UserSettings::default());
        for pair in analysis.history.windows(2) {
            prop_assert!(pair[0].start_date > pair[1].start_date);
            prop_assert!(pair[1].end_date <= pair[0].start_date);
        }
        for item in &analysis.history {
            prop_assert!(item.length > 14);
        }
    }

    #[test]
    fn confidence_is_monotonic_in_variability(
        a in 0.0f64..20.0,
        b in 0.0f64..20.0,
        count in 2usize..12
    ) {
        let config = AnalysisConfig::default();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            prediction_confidence(low, count, &config) >= prediction_confidence(high, count, &config)
        );
    }

    #[test]
    fn too_few_cycles_is_low_confidence(variability in 0.0f64..20.0) {
        let config = AnalysisConfig::default();
        prop_assert_eq!(
            prediction_confidence(variability, 1, &config),
            PredictionConfidence::Low
        );
    }

    #[test]
    fn prediction_round_trip(offset in -3650i64..3650, length in 21u32..=45) {
        let last = offset_days(epoch(), offset).unwrap();
        let next = predict_next_period(last, length).unwrap();
        prop_assert_eq!(Some(next), offset_days(last, length as i64));
        prop_assert_eq!(predict_ovulation(next), offset_days(last, length as i64 - 14));
    }

    #[test]
    fn phase_day_stays_in_cycle(offset in -400i64..400, length in 21u32..=45) {
        let today = epoch();
        let settings = UserSettings {
            last_period_date: offset_days(today, offset),
            avg_cycle_length: length,
            ..Default::default()
        };
        let phase = compute_phase(today, &settings);

        prop_assert!((1..=length as i64).contains(&phase.day_in_cycle));
        prop_assert_eq!(phase.days_until_next_period, length as i64 - phase.day_in_cycle);
    }
}
