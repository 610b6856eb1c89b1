//! Cycle segmentation
//!
//! Walks the log book in chronological order and cuts it into cycles at each
//! period start. A flow day starts a period when the calendar day before it has
//! no log or a log without flow. The lookback is always exactly one calendar
//! day, so a flow log after any logging gap is a new start.

use chrono::NaiveDate;

use crate::dates::{days_between, iso, offset_days};
use crate::types::{Anomaly, AnomalyType, CycleHistoryItem, LogBook};

/// Output of segmentation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segmentation {
    /// Fully bounded cycles, oldest first
    pub history: Vec<CycleHistoryItem>,
    /// Short segments discarded as breakthrough bleeding
    pub spotting: Vec<Anomaly>,
}

/// Open cycle while walking the log book
struct OpenCycle {
    start: NaiveDate,
    period_days: u32,
}

/// Segment the logs into cycles.
///
/// Segments of `spotting_max_gap` days or fewer do not become history items;
/// they are reported as `Spotting` anchored at the discarded segment's start.
/// The trailing open cycle is never reported.
pub fn segment(logs: &LogBook, spotting_max_gap: i64) -> Segmentation {
    let mut result = Segmentation::default();
    let mut open: Option<OpenCycle> = None;

    for (&date, _) in logs.iter().filter(|(_, log)| log.has_flow()) {
        if !is_period_start(logs, date) {
            if let Some(cycle) = open.as_mut() {
                cycle.period_days += 1;
            }
            continue;
        }

        if let Some(previous) = open.take() {
            close_cycle(&mut result, previous, date, spotting_max_gap);
        }

        open = Some(OpenCycle {
            start: date,
            period_days: 1,
        });
    }

    result
}

/// True when `date` has flow and the previous calendar day does not.
///
/// A date with no representable previous day counts as a start.
pub fn is_period_start(logs: &LogBook, date: NaiveDate) -> bool {
    offset_days(date, -1)
        .and_then(|previous| logs.get(&previous))
        .map_or(true, |previous| !previous.has_flow())
}

fn close_cycle(result: &mut Segmentation, cycle: OpenCycle, next_start: NaiveDate, max_gap: i64) {
    let length = days_between(cycle.start, next_start);

    if length > max_gap {
        tracing::debug!(
            start = %cycle.start,
            end = %next_start,
            length,
            period_days = cycle.period_days,
            "closed cycle"
        );
        result.history.push(CycleHistoryItem {
            start_date: cycle.start,
            end_date: next_start,
            length,
            period_length: cycle.period_days,
        });
    } else {
        tracing::debug!(start = %cycle.start, length, "short segment treated as spotting");
        result.spotting.push(Anomaly {
            kind: AnomalyType::Spotting,
            date: Some(cycle.start),
            details: format!(
                "Bleeding {} days after {} is treated as spotting, not a new cycle",
                length,
                iso(cycle.start)
            ),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DayLog, FlowIntensity};
    use pretty_assertions::assert_eq;

    fn day(n: i64) -> NaiveDate {
        offset_days(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), n - 1).unwrap()
    }

    fn book(flow_days: &[i64]) -> LogBook {
        flow_days
            .iter()
            .map(|&n| (day(n), DayLog::new(day(n)).with_flow(FlowIntensity::Medium)))
            .collect()
    }

    #[test]
    fn test_single_bounded_cycle() {
        let logs = book(&[1, 2, 3, 4, 5, 30, 31, 32, 33, 34]);
        let seg = segment(&logs, 14);

        assert_eq!(
            seg.history,
            vec![CycleHistoryItem {
                start_date: day(1),
                end_date: day(30),
                length: 29,
                period_length: 5,
            }]
        );
        assert!(seg.spotting.is_empty());
    }

    #[test]
    fn test_short_gap_is_spotting() {
        let logs = book(&[1, 6]);
        let seg = segment(&logs, 14);

        assert!(seg.history.is_empty());
        assert_eq!(seg.spotting.len(), 1);
        assert_eq!(seg.spotting[0].kind, AnomalyType::Spotting);
        assert_eq!(seg.spotting[0].date, Some(day(1)));
    }

    #[test]
    fn test_spotting_discards_segment_and_restarts() {
        // start on 1, spotting on 10, next period on 38: the cycle is measured
        // from the spotting day, not merged back to day 1
        let logs = book(&[1, 2, 3, 10, 38, 39]);
        let seg = segment(&logs, 14);

        assert_eq!(seg.spotting.len(), 1);
        assert_eq!(seg.history.len(), 1);
        assert_eq!(seg.history[0].start_date, day(10));
        assert_eq!(seg.history[0].length, 28);
        assert_eq!(seg.history[0].period_length, 1);
    }

    #[test]
    fn test_fourteen_days_is_still_spotting() {
        let seg = segment(&book(&[1, 15]), 14);
        assert!(seg.history.is_empty());

        let seg = segment(&book(&[1, 16]), 14);
        assert_eq!(seg.history[0].length, 15);
    }

    #[test]
    fn test_no_flow_log_breaks_the_run() {
        let mut logs = book(&[1, 2, 4, 30]);
        logs.insert(day(3), DayLog::new(day(3)));

        let seg = segment(&logs, 14);
        // day 4 follows a flow-free log, so it starts a (short) segment
        assert_eq!(seg.spotting.len(), 1);
        assert_eq!(seg.spotting[0].date, Some(day(1)));
        assert_eq!(seg.history[0].start_date, day(4));
        assert_eq!(seg.history[0].length, 26);
    }

    #[test]
    fn test_earliest_date_starts_a_period() {
        let first = NaiveDate::MIN;
        let next = offset_days(first, 30).unwrap();
        let logs: LogBook = [first, next]
            .into_iter()
            .map(|d| (d, DayLog::new(d).with_flow(FlowIntensity::Light)))
            .collect();

        assert!(is_period_start(&logs, first));
        let seg = segment(&logs, 14);
        assert_eq!(seg.history[0].start_date, first);
        assert_eq!(seg.history[0].length, 30);
    }

    #[test]
    fn test_trailing_cycle_not_reported() {
        let seg = segment(&book(&[1, 2, 3]), 14);
        assert_eq!(seg, Segmentation::default());
    }

    #[test]
    fn test_non_flow_logs_ignored() {
        let mut logs = LogBook::new();
        for n in 1..=40 {
            logs.insert(day(n), DayLog::new(day(n)));
        }
        assert_eq!(segment(&logs, 14), Segmentation::default());
    }
}
