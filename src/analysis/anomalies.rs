//! Anomaly detection
//!
//! Aggregate findings over the cycle statistics, plus per-day findings taken
//! straight from the logs.

use crate::analysis::stats::CycleStats;
use crate::analysis::AnalysisConfig;
use crate::types::{Anomaly, AnomalyType, LogBook};

/// Findings on the averaged history: short, long and irregular cycles
pub fn aggregate_anomalies(stats: &CycleStats, config: &AnalysisConfig) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    if stats.avg_length < config.short_cycle_days {
        anomalies.push(Anomaly {
            kind: AnomalyType::ShortCycle,
            date: None,
            details: format!(
                "Average cycle of {} days is shorter than {} days",
                stats.avg_length, config.short_cycle_days
            ),
        });
    }

    if stats.avg_length > config.long_cycle_days {
        anomalies.push(Anomaly {
            kind: AnomalyType::LongCycle,
            date: None,
            details: format!(
                "Average cycle of {} days is longer than {} days",
                stats.avg_length, config.long_cycle_days
            ),
        });
    }

    if stats.variability > config.irregular_variability {
        anomalies.push(Anomaly {
            kind: AnomalyType::Irregular,
            date: None,
            details: format!(
                "Cycle length varies by {:.1} days between cycles",
                stats.variability
            ),
        });
    }

    anomalies
}

/// One finding per logged day at or above the pain threshold, oldest first
pub fn pain_anomalies(logs: &LogBook, config: &AnalysisConfig) -> Vec<Anomaly> {
    logs.values()
        .filter(|log| log.pain_level >= config.high_pain_level)
        .map(|log| Anomaly {
            kind: AnomalyType::HighPain,
            date: Some(log.date),
            details: format!("Pain level {}/10 logged", log.pain_level),
        })
        .collect()
}
