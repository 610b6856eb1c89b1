//! Error types for FemCycle core

use thiserror::Error;

use crate::schema::{LogValidationError, SettingsValidationError};

/// Errors raised at the fallible edges of the core (parsing and ingestion).
///
/// The analytics themselves never fail; they fall back to settings-declared
/// defaults when data is missing.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("Date parse error: {0}")]
    DateParseError(String),

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse log payload: {0}")]
    ParseError(String),

    #[error("Invalid day log for {date}: {source}")]
    InvalidLog {
        date: String,
        #[source]
        source: LogValidationError,
    },

    #[error("Invalid settings: {0}")]
    InvalidSettings(#[from] SettingsValidationError),
}
