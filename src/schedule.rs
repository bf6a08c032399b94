//! Prayer schedule model and evaluation.
//!
//! Holds the six daily boundaries, answers which window is active and which prayer comes next.
//! Nothing in here blocks or touches shared state.

pub mod evaluate;
pub mod prayer;
pub mod raw;
pub mod time;

pub use evaluate::{evaluate, EvaluationResult, NextDay, Overnight, PrayerSchedule, Remaining};
pub use prayer::{Language, Prayer};
pub use raw::{evaluate_raw, RawSchedule};
pub use time::{PrayerTime, TimeOfDay, MINUTES_PER_DAY};
