//! Injectable wall-clock source.

use crate::schedule::TimeOfDay;
use chrono::{Duration as ChronoDuration, Local, NaiveDateTime};
use parking_lot::Mutex;
use std::time::Duration;

/// Source of "now" for evaluation and date labels.
pub trait Clock: Send + Sync {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;

    fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from(self.now().time())
    }
}

/// Reads the host's local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock() = now;
    }

    /// Move the clock forward by `by`.
    ///
    /// # Panics
    ///
    /// Panics if `by` is too large for chrono to represent.
    pub fn advance(&self, by: Duration) {
        let by = ChronoDuration::from_std(by)
            .expect("ManualClock advanced by an unrepresentable duration");
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock()
    }
}
