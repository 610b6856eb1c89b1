//! Mood frequency
//!
//! Counts the days each mood was logged. Legacy single-mood entries are
//! already merged into `moods` at ingestion, so every day counts a mood once.

use std::collections::BTreeMap;

use crate::types::{LogBook, Mood};

/// Number of logged days per mood; moods never logged are absent
pub fn mood_counts(logs: &LogBook) -> BTreeMap<Mood, usize> {
    let mut counts = BTreeMap::new();
    for mood in logs.values().flat_map(|log| log.moods.iter().copied()) {
        *counts.entry(mood).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LogAdapter;
    use crate::types::DayLog;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_logs_have_no_counts() {
        assert!(mood_counts(&LogBook::new()).is_empty());
    }

    #[test]
    fn test_counts_per_day() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 4, d).unwrap();
        let logs: LogBook = [
            DayLog::new(day(1)).with_moods([Mood::Happy, Mood::Calm]),
            DayLog::new(day(2)).with_moods([Mood::Happy]),
            DayLog::new(day(3)),
        ]
        .into_iter()
        .map(|log| (log.date, log))
        .collect();

        assert_eq!(
            mood_counts(&logs),
            BTreeMap::from([(Mood::Calm, 1), (Mood::Happy, 2)])
        );
    }

    #[test]
    fn test_legacy_single_mood_is_counted() {
        let json = r#"{
            "2024-04-01": {"mood": "Sad"},
            "2024-04-02": {"mood": "Sad", "moods": ["Sad", "Anxious"]},
            "2024-04-03": {"moods": ["Mood Swings"], "mood": ""}
        }"#;
        let logs = LogAdapter::parse_map(json).unwrap();

        assert_eq!(
            mood_counts(&logs),
            BTreeMap::from([(Mood::Sad, 2), (Mood::Anxious, 1), (Mood::MoodSwings, 1)])
        );
    }
}
