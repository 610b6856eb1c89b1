//! Ingestion boundary
//!
//! Converts persisted JSON (including legacy entry shapes) into the canonical
//! [`crate::types::DayLog`] and [`crate::types::UserSettings`] values and
//! rejects malformed input before it reaches the engine.

mod adapter;
mod raw_log;
mod settings;

pub use adapter::*;
pub use raw_log::*;
pub use settings::*;
