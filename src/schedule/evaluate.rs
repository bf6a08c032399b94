//! Active-window and next-prayer evaluation.
//!
//! Everything works in minutes since midnight. The six boundaries split the day into six
//! half-open windows `[b[i], b[i + 1])`; the last window runs from Isha across midnight to the
//! next day's Imsak. A boundary instant belongs to the window it opens.

use super::prayer::Prayer;
use super::time::{PrayerTime, TimeOfDay, MINUTES_PER_DAY};
use std::fmt;
use std::time::Duration;

/// The six prayer times in effect for one day.
///
/// Times are expected to be non-decreasing in [`Prayer::ALL`] order. That is not checked here;
/// evaluation of an out-of-order day is still total and deterministic, only less meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrayerSchedule {
    times: [PrayerTime; 6],
}

impl PrayerSchedule {
    /// Times indexed in [`Prayer::ALL`] order.
    pub fn new(times: [PrayerTime; 6]) -> Self {
        Self { times }
    }

    pub fn time(&self, prayer: Prayer) -> PrayerTime {
        self.times[prayer.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Prayer, PrayerTime)> + '_ {
        Prayer::ALL.into_iter().zip(self.times.iter().copied())
    }

    pub fn evaluate(&self, now: TimeOfDay) -> EvaluationResult {
        evaluate(self, now)
    }
}

impl Default for PrayerSchedule {
    fn default() -> Self {
        Self::new(Prayer::ALL.map(Prayer::default_time))
    }
}

/// Whether the next prayer falls later today or on the following day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextDay {
    Today,
    Tomorrow,
}

/// Which side of midnight the overnight Isha window is on.
///
/// Both report [`Prayer::Isha`] as active; this keeps the distinction available to surfaces
/// that care about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overnight {
    /// At or after today's Isha
    AfterIsha,
    /// Past midnight, before today's Imsak
    BeforeImsak,
}

/// Minutes left until the next prayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Remaining {
    total_minutes: u16,
}

impl Remaining {
    pub fn from_minutes(total_minutes: u16) -> Self {
        Self { total_minutes }
    }

    pub fn total_minutes(&self) -> u16 {
        self.total_minutes
    }

    /// Whole hours; zero is still reported.
    pub fn hours(&self) -> u16 {
        self.total_minutes / 60
    }

    pub fn minutes(&self) -> u16 {
        self.total_minutes % 60
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.total_minutes as u64 * 60)
    }

    /// Compact Turkish form used on the widgets: `2s 45dk`, or `45dk` under an hour.
    pub fn to_turkish(&self) -> String {
        if self.hours() > 0 {
            format!("{}s {}dk", self.hours(), self.minutes())
        } else {
            format!("{}dk", self.minutes())
        }
    }
}

impl fmt::Display for Remaining {
    /// `2h 45m`, or `45m` under an hour.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hours() > 0 {
            write!(f, "{}h {}m", self.hours(), self.minutes())
        } else {
            write!(f, "{}m", self.minutes())
        }
    }
}

/// What is happening at a given instant, derived fresh for each evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationResult {
    pub active: Prayer,
    pub next: Prayer,
    pub next_time: PrayerTime,
    pub remaining: Remaining,
    pub next_day: NextDay,
    /// Set only when `active` is the overnight Isha window
    pub overnight: Option<Overnight>,
}

/// Determine the active window and the upcoming prayer at `now`.
///
/// Pure: the same `(schedule, now)` always produces the same result.
pub fn evaluate(schedule: &PrayerSchedule, now: TimeOfDay) -> EvaluationResult {
    let now_min = now.minute_of_day();
    let bounds = schedule.times.map(|t| t.minute_of_day());

    let (active, overnight) = active_window(&bounds, now_min);

    let upcoming = Prayer::ALL
        .into_iter()
        .zip(bounds)
        .find(|&(_, boundary)| boundary > now_min);

    let (next, remaining, next_day) = match upcoming {
        Some((prayer, boundary)) => (prayer, boundary - now_min, NextDay::Today),
        None => (
            Prayer::Imsak,
            (MINUTES_PER_DAY - now_min) + bounds[0],
            NextDay::Tomorrow,
        ),
    };

    EvaluationResult {
        active,
        next,
        next_time: schedule.time(next),
        remaining: Remaining::from_minutes(remaining),
        next_day,
        overnight,
    }
}

fn active_window(bounds: &[u16; 6], now: u16) -> (Prayer, Option<Overnight>) {
    for i in 0..5 {
        if bounds[i] <= now && now < bounds[i + 1] {
            return (Prayer::ALL[i], None);
        }
    }

    let overnight = if now >= bounds[5] {
        Some(Overnight::AfterIsha)
    } else if now < bounds[0] {
        Some(Overnight::BeforeImsak)
    } else {
        // Only reachable when the day is out of order.
        None
    };
    (Prayer::Isha, overnight)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(raw: &str) -> PrayerTime {
        PrayerTime::parse(raw).unwrap()
    }

    fn sample() -> PrayerSchedule {
        PrayerSchedule::new([
            t("05:45"),
            t("07:00"),
            t("12:30"),
            t("15:45"),
            t("18:10"),
            t("19:30"),
        ])
    }

    #[test]
    fn afternoon_is_dhuhr_window() {
        let result = evaluate(&sample(), t("13:00"));
        assert_eq!(result.active, Prayer::Dhuhr);
        assert_eq!(result.next, Prayer::Asr);
        assert_eq!(result.next_time, t("15:45"));
        assert_eq!((result.remaining.hours(), result.remaining.minutes()), (2, 45));
        assert_eq!(result.next_day, NextDay::Today);
        assert_eq!(result.overnight, None);
    }

    #[test]
    fn before_imsak_is_overnight_isha() {
        let result = evaluate(&sample(), t("04:00"));
        assert_eq!(result.active, Prayer::Isha);
        assert_eq!(result.overnight, Some(Overnight::BeforeImsak));
        assert_eq!(result.next, Prayer::Imsak);
        assert_eq!(result.next_day, NextDay::Today);
        assert_eq!((result.remaining.hours(), result.remaining.minutes()), (1, 45));
    }

    #[test]
    fn boundary_belongs_to_later_window() {
        let result = evaluate(&sample(), t("05:45"));
        assert_eq!(result.active, Prayer::Imsak);
        assert_eq!(result.next, Prayer::Sunrise);
        assert_eq!(result.remaining.total_minutes(), 75);

        let result = evaluate(&sample(), t("12:30"));
        assert_eq!(result.active, Prayer::Dhuhr);
        assert_eq!(result.next, Prayer::Asr);
    }

    #[test]
    fn one_minute_after_isha_wraps_to_tomorrow() {
        let result = evaluate(&sample(), t("19:31"));
        assert_eq!(result.active, Prayer::Isha);
        assert_eq!(result.overnight, Some(Overnight::AfterIsha));
        assert_eq!(result.next, Prayer::Imsak);
        assert_eq!(result.next_time, t("05:45"));
        assert_eq!(result.next_day, NextDay::Tomorrow);
        let expected = (1440 - (19 * 60 + 31)) + (5 * 60 + 45);
        assert_eq!(result.remaining.total_minutes(), expected);
    }

    #[test]
    fn exactly_at_isha_wraps_to_tomorrow() {
        let result = evaluate(&sample(), t("19:30"));
        assert_eq!(result.active, Prayer::Isha);
        assert_eq!(result.next, Prayer::Imsak);
        assert_eq!(result.next_day, NextDay::Tomorrow);
        assert_eq!(result.remaining.total_minutes(), 270 + 345);
    }

    #[test]
    fn midnight_and_last_minute() {
        let at_midnight = evaluate(&sample(), t("00:00"));
        assert_eq!(at_midnight.active, Prayer::Isha);
        assert_eq!(at_midnight.remaining.total_minutes(), 345);

        let last = evaluate(&sample(), t("23:59"));
        assert_eq!(last.next_day, NextDay::Tomorrow);
        assert_eq!(last.remaining.total_minutes(), 1 + 345);
    }

    #[test]
    fn zero_hours_still_exposed() {
        let result = evaluate(&sample(), t("15:00"));
        assert_eq!(result.remaining.hours(), 0);
        assert_eq!(result.remaining.minutes(), 45);
        assert_eq!(result.remaining.to_string(), "45m");
        assert_eq!(result.remaining.to_turkish(), "45dk");
    }

    #[test]
    fn remaining_formats() {
        let r = Remaining::from_minutes(165);
        assert_eq!(r.to_string(), "2h 45m");
        assert_eq!(r.to_turkish(), "2s 45dk");
        assert_eq!(r.as_duration(), Duration::from_secs(165 * 60));
    }

    #[test]
    fn every_window_is_reachable() {
        let schedule = sample();
        for (i, (prayer, time)) in schedule.iter().enumerate() {
            let result = schedule.evaluate(time);
            assert_eq!(result.active, prayer);
            if i < 5 {
                assert_eq!(result.next, Prayer::ALL[i + 1]);
            }
        }
    }

    #[test]
    fn default_schedule_uses_fallback_times() {
        let schedule = PrayerSchedule::default();
        assert_eq!(schedule.time(Prayer::Dhuhr), t("13:15"));
        assert_eq!(schedule.time(Prayer::Isha), t("20:00"));
    }
}
