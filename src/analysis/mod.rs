//! Cycle reconstruction and analytics
//!
//! Turns a log book into a [`CycleAnalysis`] report through fixed stages:
//!
//! 1. Segmentation - cut the logs into bounded cycles, flag spotting
//! 2. Statistics - average lengths and variability
//! 3. Confidence - rate the next prediction
//! 4. Anomalies - aggregate and per-day findings
//! 5. Correlations - behavioural statements over every logged day
//! 6. Moods - days logged per mood
//!
//! Every stage only reads its inputs, so the same logs and settings always
//! produce the same report.

pub mod anomalies;
pub mod correlations;
pub mod moods;
pub mod segmentation;
pub mod stats;

use serde::{Deserialize, Serialize};

use crate::types::{CycleAnalysis, LogBook, UserSettings};
use anomalies::{aggregate_anomalies, pain_anomalies};
use correlations::correlate;
use moods::mood_counts;
use segmentation::segment;
use stats::{prediction_confidence, CycleStats};

/// Thresholds used by the analytics stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Segments this many days or shorter are spotting, not cycles
    pub spotting_max_gap_days: i64,
    /// Average below this is a short cycle
    pub short_cycle_days: u32,
    /// Average above this is a long cycle
    pub long_cycle_days: u32,
    /// Variability above this is irregular
    pub irregular_variability: f64,
    /// Variability above this downgrades confidence to Medium
    pub medium_confidence_variability: f64,
    /// Variability above this downgrades confidence to Low
    pub low_confidence_variability: f64,
    /// Fewer bounded cycles than this always rates Low
    pub min_cycles_for_confidence: usize,
    /// Nights shorter than this count as short sleep
    pub short_sleep_hours: f64,
    /// Observations needed in the tested bucket before a correlation is claimed
    pub min_correlation_days: usize,
    /// Pain at or above this level is reported
    pub high_pain_level: u8,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            spotting_max_gap_days: 14,
            short_cycle_days: 21,
            long_cycle_days: 35,
            irregular_variability: 7.0,
            medium_confidence_variability: 2.5,
            low_confidence_variability: 5.0,
            min_cycles_for_confidence: 2,
            short_sleep_hours: 7.0,
            min_correlation_days: 6,
            high_pain_level: 8,
        }
    }
}

impl AnalysisConfig {
    pub fn with_spotting_max_gap(mut self, days: i64) -> Self {
        self.spotting_max_gap_days = days;
        self
    }

    pub fn with_high_pain_level(mut self, level: u8) -> Self {
        self.high_pain_level = level;
        self
    }

    pub fn with_min_correlation_days(mut self, days: usize) -> Self {
        self.min_correlation_days = days;
        self
    }
}

/// Analytics engine with configurable thresholds
#[derive(Debug, Clone, Default)]
pub struct CycleAnalyzer {
    config: AnalysisConfig,
}

impl CycleAnalyzer {
    /// Analyzer with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Build the full report for a log book
    pub fn analyze(&self, logs: &LogBook, settings: &UserSettings) -> CycleAnalysis {
        let config = &self.config;

        // Stage 1: segmentation
        let segmentation = segment(logs, config.spotting_max_gap_days);

        // Stage 2: statistics
        let stats = CycleStats::from_history(&segmentation.history, settings);

        // Stage 3: confidence
        let prediction_confidence =
            prediction_confidence(stats.variability, segmentation.history.len(), config);

        // Stage 4: anomalies, segmentation findings first
        let mut anomalies = segmentation.spotting;
        anomalies.extend(aggregate_anomalies(&stats, config));
        anomalies.extend(pain_anomalies(logs, config));

        // Stage 5: correlations
        let correlations = correlate(logs, config);

        // Stage 6: mood frequency
        let mood_counts = mood_counts(logs);

        let mut history = segmentation.history;
        history.reverse();

        tracing::debug!(
            logs = logs.len(),
            cycles = history.len(),
            avg_length = stats.avg_length,
            variability = stats.variability,
            confidence = ?prediction_confidence,
            anomalies = anomalies.len(),
            "cycle analysis complete"
        );

        CycleAnalysis {
            history,
            avg_length: stats.avg_length,
            avg_period: stats.avg_period,
            variability: stats.variability,
            prediction_confidence,
            anomalies,
            correlations,
            mood_counts,
        }
    }
}

/// Analyze a log book with default thresholds
pub fn analyze_cycles(logs: &LogBook, settings: &UserSettings) -> CycleAnalysis {
    CycleAnalyzer::new().analyze(logs, settings)
}
