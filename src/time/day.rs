//! Teaching days of the week.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;

use super::TimeError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A teaching day. The academic week runs Monday through Saturday; there is
/// no Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// All teaching days in week order.
    pub const ALL: [DayOfWeek; 6] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// Returns the index of this day (0 = Monday, 5 = Saturday).
    pub fn index(self) -> usize {
        match self {
            DayOfWeek::Monday => 0,
            DayOfWeek::Tuesday => 1,
            DayOfWeek::Wednesday => 2,
            DayOfWeek::Thursday => 3,
            DayOfWeek::Friday => 4,
            DayOfWeek::Saturday => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
        }
    }

    /// Maps a calendar weekday onto a teaching day. Sunday has none.
    pub fn from_weekday(weekday: Weekday) -> Option<Self> {
        match weekday {
            Weekday::Mon => Some(DayOfWeek::Monday),
            Weekday::Tue => Some(DayOfWeek::Tuesday),
            Weekday::Wed => Some(DayOfWeek::Wednesday),
            Weekday::Thu => Some(DayOfWeek::Thursday),
            Weekday::Fri => Some(DayOfWeek::Friday),
            Weekday::Sat => Some(DayOfWeek::Saturday),
            Weekday::Sun => None,
        }
    }
}

impl FromStr for DayOfWeek {
    type Err = TimeError;

    /// Accepts full lowercase names and three-letter abbreviations,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        DayOfWeek::ALL
            .into_iter()
            .find(|day| {
                let name = day.as_str();
                normalized == name || normalized == name[..3]
            })
            .ok_or_else(|| TimeError::UnknownDay(s.to_string()))
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
