//! Time-of-day values and the `HH:MM` parser.

use crate::error::ParseError;
use chrono::{NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;

/// Minutes in one civil day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time with minute precision.
///
/// Ordering follows minute-of-day, so `05:45 < 07:00` compares the way the schedule expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrayerTime {
    hour: u8,
    minute: u8,
}

/// "Now" is the same shape as a prayer boundary.
pub type TimeOfDay = PrayerTime;

impl PrayerTime {
    /// Build a time from components, rejecting anything off the clock face.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Parse `H:M` / `HH:MM`.
    ///
    /// Each field is a run of ASCII digits, so `"7:5"` reads as 07:05 and `"007:05"` as
    /// 07:05. No whitespace, signs or seconds are tolerated. Numbers too large for the clock
    /// face, however many digits, are `OutOfRange`.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let mut fields = raw.split(':');
        let (hour, minute) = match (fields.next(), fields.next(), fields.next()) {
            (Some(h), Some(m), None) => (h, m),
            _ => return Err(ParseError::malformed(raw)),
        };

        let hour = parse_field(hour).ok_or_else(|| ParseError::malformed(raw))?;
        let minute = parse_field(minute).ok_or_else(|| ParseError::malformed(raw))?;

        Self::new(hour, minute).ok_or_else(|| ParseError::OutOfRange {
            input: raw.to_string(),
            hour,
            minute,
        })
    }

    pub fn hour(&self) -> u32 {
        self.hour as u32
    }

    pub fn minute(&self) -> u32 {
        self.minute as u32
    }

    /// `h * 60 + m`, always in `0..1440`.
    pub fn minute_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Inverse of [`minute_of_day`](Self::minute_of_day); wraps past midnight.
    pub fn from_minute_of_day(minutes: u16) -> Self {
        let minutes = minutes % MINUTES_PER_DAY;
        Self {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        }
    }
}

/// Digits only; saturates instead of overflowing so huge fields still read as out of range.
fn parse_field(field: &str) -> Option<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(field.bytes().fold(0u32, |acc, b| {
        acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
    }))
}

impl FromStr for PrayerTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PrayerTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl From<NaiveTime> for PrayerTime {
    /// Seconds are truncated.
    fn from(time: NaiveTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }
}
