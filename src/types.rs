//! Core types for the FemCycle core
//!
//! This module defines the canonical data that flows into the engine (day logs and
//! user settings) and the derived reports that flow out of it (phase, history,
//! analysis). Wire names are camelCase to match the persisted store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// ISO calendar date format used on the wire
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Log collection keyed by calendar date, iterated in chronological order
pub type LogBook = BTreeMap<NaiveDate, DayLog>;

/// Menstrual flow intensity (ordinal, serialized as 0-3)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FlowIntensity {
    #[default]
    None = 0,
    Light = 1,
    Medium = 2,
    Heavy = 3,
}

impl FlowIntensity {
    pub fn is_bleeding(&self) -> bool {
        *self > FlowIntensity::None
    }
}

impl From<FlowIntensity> for u8 {
    fn from(flow: FlowIntensity) -> Self {
        flow as u8
    }
}

impl TryFrom<u8> for FlowIntensity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(FlowIntensity::None),
            1 => Ok(FlowIntensity::Light),
            2 => Ok(FlowIntensity::Medium),
            3 => Ok(FlowIntensity::Heavy),
            other => Err(format!("flow intensity out of range: {other}")),
        }
    }
}

/// Mood tags from the fixed catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Mood {
    Calm,
    Happy,
    Irritable,
    Sad,
    Anxious,
    Energetic,
    Depressed,
    #[serde(rename = "Mood Swings", alias = "MoodSwings")]
    MoodSwings,
}

impl Mood {
    /// Moods counted as a "bad mood" day by the sleep correlation
    pub fn is_negative(&self) -> bool {
        matches!(
            self,
            Mood::Irritable | Mood::Sad | Mood::Anxious | Mood::Depressed
        )
    }
}

/// Sexual activity for the day (mutually exclusive)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SexType {
    #[default]
    None,
    Protected,
    Unprotected,
}

/// Descriptive tags attached to sexual activity.
///
/// Written with the labels the store already holds; snake_case names are
/// accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SexDetail {
    #[serde(rename = "Высокое либидо", alias = "high_libido")]
    HighLibido,
    #[serde(rename = "Низкое либидо", alias = "low_libido")]
    LowLibido,
    #[serde(rename = "Дискомфорт", alias = "discomfort")]
    Discomfort,
    #[serde(rename = "Использовали смазку", alias = "used_lubricant")]
    UsedLubricant,
    #[serde(rename = "Оргазм", alias = "orgasm")]
    Orgasm,
}

/// Three-step self-reported level (energy, stress)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DischargeType {
    None,
    Sticky,
    Creamy,
    #[serde(rename = "Egg White")]
    EggWhite,
    Watery,
    Unusual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BleedingColor {
    Red,
    Brown,
    Pink,
    Black,
}

/// One day of user observations.
///
/// A `DayLog` reaching the engine is already normalized: `moods` is a set and
/// `sex` is one of the three states. Legacy shapes are converted by
/// [`crate::schema::RawDayLog`] before construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLog {
    pub date: NaiveDate,
    #[serde(default)]
    pub flow: FlowIntensity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bleeding_color: Option<BleedingColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bleeding_clots: Option<bool>,
    #[serde(default)]
    pub moods: BTreeSet<Mood>,
    #[serde(default)]
    pub symptoms: BTreeSet<String>,
    /// 0-10
    #[serde(default)]
    pub pain_level: u8,
    #[serde(default)]
    pub pain_locations: Vec<String>,
    #[serde(default)]
    pub sleep_hours: f64,
    #[serde(default)]
    pub water_glasses: u32,
    #[serde(default)]
    pub sex: SexType,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub sex_details: BTreeSet<SexDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discharge: Option<DischargeType>,
    /// Basal body temperature (celsius)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Body weight (kg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contraceptive_taken: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub medications: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nutrition: Vec<String>,
}

impl DayLog {
    /// An empty log for `date` (no flow, no tags)
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            flow: FlowIntensity::None,
            bleeding_color: None,
            bleeding_clots: None,
            moods: BTreeSet::new(),
            symptoms: BTreeSet::new(),
            pain_level: 0,
            pain_locations: Vec::new(),
            sleep_hours: 0.0,
            water_glasses: 0,
            sex: SexType::None,
            sex_details: BTreeSet::new(),
            energy: None,
            stress: None,
            discharge: None,
            temperature: None,
            weight: None,
            notes: String::new(),
            contraceptive_taken: None,
            medications: Vec::new(),
            nutrition: Vec::new(),
        }
    }

    pub fn with_flow(mut self, flow: FlowIntensity) -> Self {
        self.flow = flow;
        self
    }

    pub fn with_moods(mut self, moods: impl IntoIterator<Item = Mood>) -> Self {
        self.moods = moods.into_iter().collect();
        self
    }

    pub fn with_sleep(mut self, hours: f64) -> Self {
        self.sleep_hours = hours;
        self
    }

    pub fn has_flow(&self) -> bool {
        self.flow.is_bleeding()
    }

    /// True when any mood tag counts as a bad mood
    pub fn has_bad_mood(&self) -> bool {
        self.moods.iter().any(Mood::is_negative)
    }
}

/// Tracking mode, selects the phase-calculation branch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserGoal {
    #[default]
    Track,
    Avoid,
    Conceive,
    Pregnancy,
    Postpartum,
    Menopause,
}

/// User configuration captured at onboarding and edited in settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default)]
    pub is_onboarded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Most recent confirmed period start; empty string on the wire means unknown
    #[serde(default, with = "optional_iso_date")]
    pub last_period_date: Option<NaiveDate>,
    /// Declared cycle length in days (21-45)
    pub avg_cycle_length: u32,
    /// Declared period length in days (1-8)
    pub avg_period_length: u32,
    #[serde(default)]
    pub goal: UserGoal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contraception_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_consented: Option<bool>,
    #[serde(default)]
    pub is_pro: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            is_onboarded: false,
            name: None,
            age: None,
            last_period_date: None,
            avg_cycle_length: 28,
            avg_period_length: 5,
            goal: UserGoal::Track,
            contraception_type: None,
            has_consented: None,
            is_pro: false,
        }
    }
}

mod optional_iso_date {
    use super::ISO_DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format(ISO_DATE_FORMAT).to_string()),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, ISO_DATE_FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// Cycle phase label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Menstruation,
    Follicular,
    Ovulation,
    Luteal,
    Pregnancy,
    Postpartum,
    Menopause,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Menstruation => "Menstruation",
            Phase::Follicular => "Follicular",
            Phase::Ovulation => "Ovulation",
            Phase::Luteal => "Luteal",
            Phase::Pregnancy => "Pregnancy",
            Phase::Postpartum => "Postpartum",
            Phase::Menopause => "Menopause",
        };
        f.write_str(name)
    }
}

/// Where "today" falls in the cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CyclePhase {
    pub phase: Phase,
    /// 1-based (0 in postpartum/menopause modes)
    pub day_in_cycle: i64,
    pub days_until_next_period: i64,
    pub is_fertile: bool,
}

/// A reconstructed, fully bounded cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleHistoryItem {
    pub start_date: NaiveDate,
    /// Start of the next detected cycle
    pub end_date: NaiveDate,
    /// Days from start to next start
    pub length: i64,
    /// Consecutive flow days at the start of the cycle
    pub period_length: u32,
}

/// Confidence in the next-period prediction.
///
/// Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PredictionConfidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnomalyType {
    ShortCycle,
    LongCycle,
    Irregular,
    Spotting,
    HighPain,
}

/// A tagged finding in the log history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    #[serde(rename = "type")]
    pub kind: AnomalyType,
    /// Anchor date for per-day findings; aggregate findings carry none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub details: String,
}

/// Human-readable behavioural statements derived from the logs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correlations {
    pub sleep_effect: String,
    pub stress_effect: String,
}

/// Full analytics report, derived fresh from logs and settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleAnalysis {
    /// Most recent first
    pub history: Vec<CycleHistoryItem>,
    pub avg_length: u32,
    pub avg_period: u32,
    /// Population standard deviation of cycle lengths (days)
    pub variability: f64,
    pub prediction_confidence: PredictionConfidence,
    pub anomalies: Vec<Anomaly>,
    pub correlations: Correlations,
    /// Days logged per mood
    pub mood_counts: BTreeMap<Mood, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_serializes_as_integer() {
        let log = DayLog::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .with_flow(FlowIntensity::Medium);
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["flow"], 2);
        assert_eq!(json["date"], "2024-03-01");
    }

    #[test]
    fn test_flow_out_of_range_rejected() {
        let result: Result<FlowIntensity, _> = serde_json::from_str("7");
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_empty_last_period_is_unknown() {
        let json = r#"{"lastPeriodDate": "", "avgCycleLength": 30, "avgPeriodLength": 4, "isPro": false}"#;
        let settings: UserSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.last_period_date, None);
        assert_eq!(settings.goal, UserGoal::Track);

        let back = serde_json::to_value(&settings).unwrap();
        assert_eq!(back["lastPeriodDate"], "");
    }

    #[test]
    fn test_settings_with_date_and_goal() {
        let json = r#"{"lastPeriodDate": "2024-02-10", "avgCycleLength": 28, "avgPeriodLength": 5, "goal": "conceive"}"#;
        let settings: UserSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.last_period_date, NaiveDate::from_ymd_opt(2024, 2, 10));
        assert_eq!(settings.goal, UserGoal::Conceive);
    }

    #[test]
    fn test_mood_wire_names() {
        let mood: Mood = serde_json::from_str("\"Mood Swings\"").unwrap();
        assert_eq!(mood, Mood::MoodSwings);
        assert!(Mood::Anxious.is_negative());
        assert!(!Mood::Calm.is_negative());
    }

    #[test]
    fn test_sex_details_keep_stored_labels() {
        let json = serde_json::to_value(SexDetail::LowLibido).unwrap();
        assert_eq!(json, "Низкое либидо");

        let parsed: Vec<SexDetail> =
            serde_json::from_str(r#"["Оргазм", "used_lubricant"]"#).unwrap();
        assert_eq!(parsed, vec![SexDetail::Orgasm, SexDetail::UsedLubricant]);
    }

    #[test]
    fn test_confidence_ordering() {
        assert!(PredictionConfidence::Low < PredictionConfidence::Medium);
        assert!(PredictionConfidence::Medium < PredictionConfidence::High);
    }

    #[test]
    fn test_anomaly_uses_type_key() {
        let anomaly = Anomaly {
            kind: AnomalyType::LongCycle,
            date: None,
            details: "long".to_string(),
        };
        let json = serde_json::to_value(&anomaly).unwrap();
        assert_eq!(json["type"], "LongCycle");
        assert!(json.get("date").is_none());
    }
}
