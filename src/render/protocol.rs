//! Types shared between the refresh coordinator and display sinks.

use crate::error::SinkError;
use crate::schedule::{EvaluationResult, PrayerSchedule, TimeOfDay};
use chrono::NaiveDateTime;
use std::fmt;

/// Opaque handle for a registered surface, usually the platform's widget instance id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SinkId(pub u32);

impl fmt::Display for SinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sink#{}", self.0)
    }
}

/// Everything a sink receives on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderFrame {
    pub result: EvaluationResult,
    /// Schedule the result was computed from
    pub schedule: PrayerSchedule,
    /// Clock reading taken at the start of the tick
    pub at: NaiveDateTime,
    /// True when the stored schedule was unusable and the built-in defaults were evaluated
    pub fallback: bool,
}

impl RenderFrame {
    pub fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from(self.at.time())
    }
}

/// Lifecycle of a coordinator's timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    Idle,
    Running,
}

/// Outcome of one tick's fan-out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Sinks that rendered successfully
    pub rendered: usize,
    /// Render failures and panics, tagged with their sink, in registration order
    pub failed: Vec<SinkError>,
    pub fallback: bool,
}

impl TickReport {
    /// Ids of the sinks that failed this tick.
    pub fn failed_ids(&self) -> Vec<SinkId> {
        self.failed.iter().filter_map(SinkError::sink).collect()
    }
}
