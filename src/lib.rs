//! FemCycle core - offline menstrual-cycle engine
//!
//! Computes where the user is in their cycle, predicts the next period and
//! ovulation, and reconstructs cycle history from daily logs. Everything is a
//! deterministic function of `(logs, settings, today)`:
//!
//! - **Phase**: current phase and fertility from declared settings
//! - **Prediction**: next period, ovulation and fertile window
//! - **Analysis**: history, statistics, confidence, anomalies, correlations
//! - **Schema**: ingestion of persisted JSON, including legacy entries
//!
//! ```
//! use chrono::NaiveDate;
//! use femcycle_core::{compute_phase, types::Phase, UserSettings};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let settings = UserSettings {
//!     last_period_date: NaiveDate::from_ymd_opt(2024, 6, 1),
//!     ..Default::default()
//! };
//! let phase = compute_phase(today, &settings);
//! assert_eq!(phase.phase, Phase::Ovulation);
//! assert_eq!(phase.day_in_cycle, 15);
//! ```

pub mod analysis;
pub mod calendar;
pub mod clock;
pub mod dates;
pub mod error;
pub mod phase;
pub mod prediction;
pub mod schema;
pub mod tracker;
pub mod types;

pub use analysis::{analyze_cycles, AnalysisConfig, CycleAnalyzer};
pub use calendar::{day_status, DayStatus};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::CycleError;
pub use phase::compute_phase;
pub use prediction::{fertile_window, predict_next_period, predict_ovulation, upcoming};
pub use tracker::{record_day_log, reset_settings, RecordOutcome};
pub use types::{CycleAnalysis, CyclePhase, DayLog, LogBook, UserSettings};

// Schema exports
pub use schema::{LogAdapter, RawDayLog};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
