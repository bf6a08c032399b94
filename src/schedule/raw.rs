//! Schedule as stored: six `HH:MM` strings keyed by prayer.

use super::evaluate::{evaluate, EvaluationResult, PrayerSchedule};
use super::prayer::Prayer;
use super::time::{PrayerTime, TimeOfDay};
use crate::error::{EvaluationError, ParseError};

/// The key-value form of a day's schedule, exactly as an external writer supplied it.
///
/// All six entries are always present; absent keys take the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSchedule {
    entries: [String; 6],
}

impl RawSchedule {
    /// Six strings in [`Prayer::ALL`] order.
    pub fn new(
        imsak: impl Into<String>,
        gunes: impl Into<String>,
        ogle: impl Into<String>,
        ikindi: impl Into<String>,
        aksam: impl Into<String>,
        yatsi: impl Into<String>,
    ) -> Self {
        Self {
            entries: [
                imsak.into(),
                gunes.into(),
                ogle.into(),
                ikindi.into(),
                aksam.into(),
                yatsi.into(),
            ],
        }
    }

    /// Build from stored key/value pairs. Unknown keys are ignored.
    pub fn from_entries<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut schedule = Self::default();
        for (key, value) in pairs {
            if let Some(prayer) = Prayer::from_storage_key(key.as_ref()) {
                schedule.entries[prayer.index()] = value.into();
            }
        }
        schedule
    }

    pub fn get(&self, prayer: Prayer) -> &str {
        &self.entries[prayer.index()]
    }

    /// `(storage key, value)` in canonical order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        Prayer::ALL
            .into_iter()
            .map(move |p| (p.storage_key(), self.get(p)))
    }

    /// Parse every entry; the first failure names its prayer.
    pub fn parse(&self) -> Result<PrayerSchedule, EvaluationError> {
        let mut times = [PrayerTime::from_minute_of_day(0); 6];
        for prayer in Prayer::ALL {
            times[prayer.index()] = PrayerTime::parse(self.get(prayer))
                .map_err(|source| EvaluationError::InvalidSchedule { prayer, source })?;
        }
        Ok(PrayerSchedule::new(times))
    }

    /// Validate for an incoming update, reporting the raw parse failure.
    pub fn validate(&self) -> Result<PrayerSchedule, (Prayer, ParseError)> {
        self.parse().map_err(|err| match err {
            EvaluationError::InvalidSchedule { prayer, source } => (prayer, source),
        })
    }
}

impl Default for RawSchedule {
    fn default() -> Self {
        Self {
            entries: Prayer::ALL.map(|p| p.default_raw().to_string()),
        }
    }
}

impl From<&PrayerSchedule> for RawSchedule {
    fn from(schedule: &PrayerSchedule) -> Self {
        Self {
            entries: Prayer::ALL.map(|p| schedule.time(p).to_string()),
        }
    }
}

/// Parse then evaluate a stored schedule.
pub fn evaluate_raw(raw: &RawSchedule, now: TimeOfDay) -> Result<EvaluationResult, EvaluationError> {
    raw.parse().map(|schedule| evaluate(&schedule, now))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_keys_take_defaults() {
        let raw = RawSchedule::from_entries([("ogle", "12:30"), ("unknown", "01:00")]);
        assert_eq!(raw.get(Prayer::Dhuhr), "12:30");
        assert_eq!(raw.get(Prayer::Imsak), "05:30");
        assert_eq!(raw.get(Prayer::Isha), "20:00");
    }

    #[test]
    fn entries_in_canonical_order() {
        let keys: Vec<_> = RawSchedule::default().entries().map(|(k, _)| k).collect();
        assert_eq!(keys, ["imsak", "gunes", "ogle", "ikindi", "aksam", "yatsi"]);
    }

    #[test]
    fn invalid_entry_fails_whole_schedule() {
        let raw = RawSchedule::new("05:45", "07:00", "12:30", "abc", "18:10", "19:30");
        match raw.parse() {
            Err(EvaluationError::InvalidSchedule { prayer, source }) => {
                assert_eq!(prayer, Prayer::Asr);
                assert!(matches!(source, ParseError::Malformed { .. }));
            }
            other => panic!("expected InvalidSchedule, got {other:?}"),
        }

        let now = PrayerTime::parse("13:00").unwrap();
        assert!(evaluate_raw(&raw, now).is_err());
    }

    #[test]
    fn validate_reports_out_of_range() {
        let raw = RawSchedule::new("05:45", "07:00", "12:30", "15:45", "18:10", "25:00");
        let (prayer, err) = raw.validate().unwrap_err();
        assert_eq!(prayer, Prayer::Isha);
        assert!(matches!(err, ParseError::OutOfRange { hour: 25, .. }));
    }

    #[test]
    fn evaluate_raw_matches_parsed_evaluation() {
        let raw = RawSchedule::new("05:45", "07:00", "12:30", "15:45", "18:10", "19:30");
        let now = PrayerTime::parse("13:00").unwrap();
        let result = evaluate_raw(&raw, now).unwrap();
        assert_eq!(result.active, Prayer::Dhuhr);
        assert_eq!(result.next, Prayer::Asr);
    }

    #[test]
    fn converts_from_parsed_schedule() {
        let raw = RawSchedule::from(&PrayerSchedule::default());
        assert_eq!(raw, RawSchedule::default());
    }
}
