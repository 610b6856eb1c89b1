//! Persisted day-log shape
//!
//! Stored logs predate the canonical model: older entries carry a single `mood`
//! string instead of a `moods` list and a boolean `sex` flag instead of the
//! three-state value. `RawDayLog` accepts both and converts to [`DayLog`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::types::{
    BleedingColor, DayLog, DischargeType, FlowIntensity, Level, Mood, SexDetail, SexType,
};

/// Maximum note length in characters
pub const MAX_NOTES_CHARS: usize = 500;

/// Maximum pain level
pub const MAX_PAIN_LEVEL: i64 = 10;

/// Sex field as stored: boolean (legacy) or the three-state value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSex {
    Flag(bool),
    Kind(SexType),
}

impl Default for RawSex {
    fn default() -> Self {
        RawSex::Kind(SexType::None)
    }
}

impl From<RawSex> for SexType {
    /// A legacy `true` carries no protection info and maps to `Unprotected`
    fn from(raw: RawSex) -> Self {
        match raw {
            RawSex::Flag(true) => SexType::Unprotected,
            RawSex::Flag(false) => SexType::None,
            RawSex::Kind(kind) => kind,
        }
    }
}

/// Day log as read from the store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDayLog {
    /// Usually equal to the store key; older entries may omit it
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub flow: FlowIntensity,
    #[serde(default)]
    pub bleeding_color: Option<BleedingColor>,
    #[serde(default)]
    pub bleeding_clots: Option<bool>,
    #[serde(default)]
    pub moods: Vec<Mood>,
    /// Legacy single mood; empty string means none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub pain_level: i64,
    #[serde(default)]
    pub pain_locations: Vec<String>,
    #[serde(default)]
    pub sleep_hours: f64,
    #[serde(default)]
    pub water_glasses: u32,
    #[serde(default)]
    pub sex: RawSex,
    #[serde(default)]
    pub sex_details: Vec<SexDetail>,
    #[serde(default)]
    pub energy: Option<Level>,
    #[serde(default)]
    pub stress: Option<Level>,
    #[serde(default)]
    pub discharge: Option<DischargeType>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub contraceptive_taken: Option<bool>,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub nutrition: Vec<String>,
}

impl RawDayLog {
    /// Check the entry against the save-boundary rules
    pub fn validate(&self, key: NaiveDate) -> Result<(), LogValidationError> {
        if let Some(date) = self.date {
            if date != key {
                return Err(LogValidationError::DateMismatch { key, date });
            }
        }

        let notes_len = self.notes.chars().count();
        if notes_len > MAX_NOTES_CHARS {
            return Err(LogValidationError::NotesTooLong(notes_len));
        }

        if !(0..=MAX_PAIN_LEVEL).contains(&self.pain_level) {
            return Err(LogValidationError::PainOutOfRange(self.pain_level));
        }

        if !self.sleep_hours.is_finite() || self.sleep_hours < 0.0 {
            return Err(LogValidationError::InvalidMeasurement {
                field: "sleepHours",
                value: self.sleep_hours,
            });
        }

        for (field, value) in [("temperature", self.temperature), ("weight", self.weight)] {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(LogValidationError::InvalidMeasurement { field, value: v });
                }
            }
        }

        self.legacy_mood()?;
        Ok(())
    }

    /// Validate and convert to the canonical log for `key`
    pub fn into_day_log(self, key: NaiveDate) -> Result<DayLog, LogValidationError> {
        self.validate(key)?;

        let mut moods: BTreeSet<Mood> = self.moods.iter().copied().collect();
        if let Some(mood) = self.legacy_mood()? {
            moods.insert(mood);
        }

        Ok(DayLog {
            date: key,
            flow: self.flow,
            bleeding_color: self.bleeding_color,
            bleeding_clots: self.bleeding_clots,
            moods,
            symptoms: self.symptoms.into_iter().collect(),
            // range checked above
            pain_level: self.pain_level as u8,
            pain_locations: self.pain_locations,
            sleep_hours: self.sleep_hours,
            water_glasses: self.water_glasses,
            sex: self.sex.into(),
            sex_details: self.sex_details.into_iter().collect(),
            energy: self.energy,
            stress: self.stress,
            discharge: self.discharge,
            temperature: self.temperature,
            weight: self.weight,
            notes: self.notes,
            contraceptive_taken: self.contraceptive_taken,
            medications: self.medications,
            nutrition: self.nutrition,
        })
    }

    fn legacy_mood(&self) -> Result<Option<Mood>, LogValidationError> {
        match self.mood.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(name) => serde_json::from_value(serde_json::Value::String(name.to_string()))
                .map(Some)
                .map_err(|_| LogValidationError::UnknownMood(name.to_string())),
        }
    }
}

/// Reasons a stored log is rejected at the boundary
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LogValidationError {
    #[error("Entry date {date} does not match its key {key}")]
    DateMismatch { key: NaiveDate, date: NaiveDate },

    #[error("Entry has no date")]
    MissingDate,

    #[error("Notes are {0} characters, limit is 500")]
    NotesTooLong(usize),

    #[error("Pain level {0} is outside 0-10")]
    PainOutOfRange(i64),

    #[error("Invalid {field}: {value}")]
    InvalidMeasurement { field: &'static str, value: f64 },

    #[error("Unknown mood: {0}")]
    UnknownMood(String),
}
