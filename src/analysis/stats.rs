//! Aggregate cycle statistics and prediction confidence

use crate::analysis::AnalysisConfig;
use crate::types::{CycleHistoryItem, PredictionConfidence, UserSettings};

/// Descriptive statistics over the reconstructed history
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleStats {
    /// Mean cycle length, rounded to whole days
    pub avg_length: u32,
    /// Mean period length, rounded to whole days
    pub avg_period: u32,
    /// Population standard deviation of cycle lengths
    pub variability: f64,
}

impl CycleStats {
    /// Compute statistics, falling back to the declared averages when the
    /// history is empty
    pub fn from_history(history: &[CycleHistoryItem], settings: &UserSettings) -> Self {
        if history.is_empty() {
            return Self {
                avg_length: settings.avg_cycle_length,
                avg_period: settings.avg_period_length,
                variability: 0.0,
            };
        }

        let lengths: Vec<f64> = history.iter().map(|c| c.length as f64).collect();
        let periods: Vec<f64> = history.iter().map(|c| c.period_length as f64).collect();

        Self {
            avg_length: mean(&lengths).round() as u32,
            avg_period: mean(&periods).round() as u32,
            variability: population_std_dev(&lengths),
        }
    }
}

/// Rate the prediction from the spread of cycle lengths.
///
/// Too few cycles always rates `Low`, whatever the spread.
pub fn prediction_confidence(
    variability: f64,
    cycle_count: usize,
    config: &AnalysisConfig,
) -> PredictionConfidence {
    if cycle_count < config.min_cycles_for_confidence {
        return PredictionConfidence::Low;
    }

    if variability > config.low_confidence_variability {
        PredictionConfidence::Low
    } else if variability > config.medium_confidence_variability {
        PredictionConfidence::Medium
    } else {
        PredictionConfidence::High
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard deviation dividing by `n`, not `n - 1`
fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
