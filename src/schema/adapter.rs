//! Adapter from persisted JSON to canonical inputs
//!
//! The store keeps logs as an object keyed by ISO date. This adapter parses that
//! layout (or a plain array of entries), normalizes each entry and builds the
//! ordered [`LogBook`] the engine consumes.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::dates::parse_date;
use crate::error::CycleError;
use crate::schema::raw_log::{LogValidationError, RawDayLog};
use crate::types::{LogBook, UserSettings};

/// Adapter for converting stored logs and settings
pub struct LogAdapter;

impl LogAdapter {
    /// Parse the keyed layout `{ "YYYY-MM-DD": { ... }, ... }`
    pub fn parse_map(json: &str) -> Result<LogBook, CycleError> {
        let raw = Self::parse_raw_map(json)?;
        let mut logs = LogBook::new();

        for (key, entry) in raw {
            let date = parse_date(&key)?;
            let log = entry.into_day_log(date).map_err(|source| {
                tracing::warn!(date = %key, error = %source, "rejected day log");
                CycleError::InvalidLog { date: key, source }
            })?;
            logs.insert(date, log);
        }

        Ok(logs)
    }

    /// Parse an array of entries, each carrying its own `date`
    pub fn parse_array(json: &str) -> Result<LogBook, CycleError> {
        let entries: Vec<RawDayLog> = serde_json::from_str(json)?;
        let mut logs = LogBook::new();

        for (idx, entry) in entries.into_iter().enumerate() {
            let Some(date) = entry.date else {
                return Err(CycleError::InvalidLog {
                    date: format!("entry {idx}"),
                    source: LogValidationError::MissingDate,
                });
            };
            if logs.contains_key(&date) {
                return Err(CycleError::ParseError(format!(
                    "Duplicate log for {date} at entry {idx}"
                )));
            }
            let log = entry
                .into_day_log(date)
                .map_err(|source| CycleError::InvalidLog {
                    date: date.to_string(),
                    source,
                })?;
            logs.insert(date, log);
        }

        Ok(logs)
    }

    /// Parse the keyed layout without validating entries
    pub fn parse_raw_map(json: &str) -> Result<BTreeMap<String, RawDayLog>, CycleError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate every entry, returning only the failures
    pub fn validate_logs(entries: &BTreeMap<String, RawDayLog>) -> Vec<LogIssue> {
        entries
            .iter()
            .filter_map(|(key, entry)| {
                let error = match parse_date(key) {
                    Ok(date) => entry.validate(date).err()?.to_string(),
                    Err(e) => e.to_string(),
                };
                Some(LogIssue {
                    key: key.clone(),
                    error,
                })
            })
            .collect()
    }

    /// Serialize a log book back to the keyed layout
    pub fn to_json(logs: &LogBook) -> Result<String, CycleError> {
        Ok(serde_json::to_string_pretty(logs)?)
    }

    /// Parse and validate stored settings as of `today`
    pub fn parse_settings(json: &str, today: NaiveDate) -> Result<UserSettings, CycleError> {
        let settings: UserSettings = serde_json::from_str(json)?;
        settings.validate(today)?;
        Ok(settings)
    }
}

/// A stored entry that failed validation
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LogIssue {
    pub key: String,
    pub error: String,
}
