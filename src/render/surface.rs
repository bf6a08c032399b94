//! Text layout for the four display surfaces.
//!
//! Each surface shows a subset of the same frame:
//!
//! - **Small**: next prayer, its time, and the countdown
//! - **Medium**: date plus all six rows, active row highlighted
//! - **Large**: medium layout with a next-prayer header and "remaining" suffix
//! - **Notification**: date, six rows, and a one-line next-prayer summary

use crate::render::protocol::RenderFrame;
use crate::schedule::{Language, Prayer};
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

const TURKISH_MONTHS: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül", "Ekim",
    "Kasım", "Aralık",
];

const TURKISH_WEEKDAYS: [&str; 7] = [
    "Pazartesi",
    "Salı",
    "Çarşamba",
    "Perşembe",
    "Cuma",
    "Cumartesi",
    "Pazar",
];

/// Which kind of surface a sink draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum SurfaceKind {
    Small,
    Medium,
    Large,
    Notification,
}

impl SurfaceKind {
    pub const ALL: [SurfaceKind; 4] = [
        SurfaceKind::Small,
        SurfaceKind::Medium,
        SurfaceKind::Large,
        SurfaceKind::Notification,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SurfaceKind::Small => "small",
            SurfaceKind::Medium => "medium",
            SurfaceKind::Large => "large",
            SurfaceKind::Notification => "notification",
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SurfaceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown surface '{}'", s))
    }
}

/// One prayer line on a multi-row surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceRow {
    pub prayer: Prayer,
    pub label: &'static str,
    pub time: String,
    pub active: bool,
}

/// Fully laid-out content for one surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceView {
    pub kind: SurfaceKind,
    pub language: Language,
    pub date: Option<String>,
    pub next_label: &'static str,
    pub next_time: String,
    pub remaining: String,
    /// Empty for the small surface
    pub rows: Vec<SurfaceRow>,
}

/// Lay out `frame` for `kind`.
pub fn compose(kind: SurfaceKind, frame: &RenderFrame, language: Language) -> SurfaceView {
    let result = &frame.result;
    let date = frame.at.date();

    let date = match kind {
        SurfaceKind::Small => None,
        SurfaceKind::Medium | SurfaceKind::Large => Some(day_month(date, language)),
        SurfaceKind::Notification => Some(day_month_weekday(date, language)),
    };

    let rows = match kind {
        SurfaceKind::Small => Vec::new(),
        _ => frame
            .schedule
            .iter()
            .map(|(prayer, time)| SurfaceRow {
                prayer,
                label: prayer.label(language),
                time: time.to_string(),
                active: prayer == result.active,
            })
            .collect(),
    };

    SurfaceView {
        kind,
        language,
        date,
        next_label: result.next.label(language),
        next_time: result.next_time.to_string(),
        remaining: remaining_text(frame, language),
        rows,
    }
}

fn remaining_text(frame: &RenderFrame, language: Language) -> String {
    if frame.fallback {
        return "-".to_string();
    }
    let remaining = frame.result.remaining;
    match language {
        Language::English => remaining.to_string(),
        Language::Turkish => remaining.to_turkish(),
    }
}

fn day_month(date: NaiveDate, language: Language) -> String {
    match language {
        Language::English => date.format("%d %B").to_string(),
        Language::Turkish => format!(
            "{:02} {}",
            date.day(),
            TURKISH_MONTHS[date.month0() as usize]
        ),
    }
}

fn day_month_weekday(date: NaiveDate, language: Language) -> String {
    match language {
        Language::English => date.format("%d/%m %A").to_string(),
        Language::Turkish => format!(
            "{:02}/{:02} {}",
            date.day(),
            date.month(),
            TURKISH_WEEKDAYS[date.weekday().num_days_from_monday() as usize]
        ),
    }
}

impl SurfaceView {
    fn suffix(&self) -> &'static str {
        match self.language {
            Language::English => " left",
            Language::Turkish => " kaldı",
        }
    }
}

impl fmt::Display for SurfaceView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(date) = &self.date {
            writeln!(f, "{}", date)?;
        }

        match self.kind {
            SurfaceKind::Small => {
                return write!(
                    f,
                    "{} {} ({})",
                    self.next_label, self.next_time, self.remaining
                );
            }
            SurfaceKind::Large => {
                writeln!(
                    f,
                    "{} {} ({}{})",
                    self.next_label,
                    self.next_time,
                    self.remaining,
                    self.suffix()
                )?;
            }
            SurfaceKind::Medium | SurfaceKind::Notification => {}
        }

        for row in &self.rows {
            let marker = if row.active { '>' } else { ' ' };
            writeln!(f, "{} {:<8} {}", marker, row.label, row.time)?;
        }

        if self.kind == SurfaceKind::Notification {
            write!(
                f,
                "-> {} {} ({})",
                self.next_label, self.next_time, self.remaining
            )?;
        }
        Ok(())
    }
}
