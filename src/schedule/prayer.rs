//! The six daily prayers and their names.

use super::time::PrayerTime;
use std::fmt;

/// Language used for display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum Language {
    English,
    #[default]
    Turkish,
}

/// One of the six daily prayer boundaries, in schedule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Prayer {
    Imsak,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// Canonical order; index `i` is the start of window `i`.
    pub const ALL: [Prayer; 6] = [
        Prayer::Imsak,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Key under which the time string is persisted.
    pub fn storage_key(self) -> &'static str {
        match self {
            Prayer::Imsak => "imsak",
            Prayer::Sunrise => "gunes",
            Prayer::Dhuhr => "ogle",
            Prayer::Asr => "ikindi",
            Prayer::Maghrib => "aksam",
            Prayer::Isha => "yatsi",
        }
    }

    pub fn from_storage_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.storage_key() == key)
    }

    /// Value used when nothing has been stored yet.
    pub fn default_raw(self) -> &'static str {
        match self {
            Prayer::Imsak => "05:30",
            Prayer::Sunrise => "07:00",
            Prayer::Dhuhr => "13:15",
            Prayer::Asr => "16:00",
            Prayer::Maghrib => "18:30",
            Prayer::Isha => "20:00",
        }
    }

    pub fn default_time(self) -> PrayerTime {
        let minutes = match self {
            Prayer::Imsak => 5 * 60 + 30,
            Prayer::Sunrise => 7 * 60,
            Prayer::Dhuhr => 13 * 60 + 15,
            Prayer::Asr => 16 * 60,
            Prayer::Maghrib => 18 * 60 + 30,
            Prayer::Isha => 20 * 60,
        };
        PrayerTime::from_minute_of_day(minutes)
    }

    pub fn label(self, language: Language) -> &'static str {
        match language {
            Language::English => match self {
                Prayer::Imsak => "Imsak",
                Prayer::Sunrise => "Sunrise",
                Prayer::Dhuhr => "Dhuhr",
                Prayer::Asr => "Asr",
                Prayer::Maghrib => "Maghrib",
                Prayer::Isha => "Isha",
            },
            Language::Turkish => match self {
                Prayer::Imsak => "İmsak",
                Prayer::Sunrise => "Güneş",
                Prayer::Dhuhr => "Öğle",
                Prayer::Asr => "İkindi",
                Prayer::Maghrib => "Akşam",
                Prayer::Isha => "Yatsı",
            },
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Language::English))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_keys_round_trip() {
        for prayer in Prayer::ALL {
            assert_eq!(Prayer::from_storage_key(prayer.storage_key()), Some(prayer));
        }
        assert_eq!(Prayer::from_storage_key("fajr"), None);
    }

    #[test]
    fn defaults_agree_with_raw_defaults() {
        for prayer in Prayer::ALL {
            assert_eq!(prayer.default_time().to_string(), prayer.default_raw());
        }
    }

    #[test]
    fn index_follows_canonical_order() {
        for (i, prayer) in Prayer::ALL.into_iter().enumerate() {
            assert_eq!(prayer.index(), i);
        }
    }

    #[test]
    fn labels() {
        assert_eq!(Prayer::Dhuhr.label(Language::Turkish), "Öğle");
        assert_eq!(Prayer::Isha.label(Language::English), "Isha");
        assert_eq!(Prayer::Maghrib.to_string(), "Maghrib");
    }
}
