//! Minute-precision wall-clock time of day.

use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};

use super::TimeError;

/// Number of minutes in one day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Wall-clock time of day, stored as minutes since midnight.
///
/// # Examples
///
/// ```
/// use classgrid::time::ClockTime;
///
/// let t: ClockTime = "08:30".parse().unwrap();
/// assert_eq!(t.minutes(), 510);
/// assert_eq!(t.to_string(), "08:30");
///
/// // Seconds from the store's `time` columns are accepted and discarded.
/// assert_eq!(ClockTime::parse("08:30:00").unwrap(), t);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Creates a clock time from minutes since midnight.
    pub fn from_minutes(minutes: u32) -> Result<Self, TimeError> {
        if minutes >= u32::from(MINUTES_PER_DAY) {
            return Err(TimeError::OutOfRange(minutes));
        }
        Ok(Self(minutes as u16))
    }

    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, TimeError> {
        let total = hour
            .checked_mul(60)
            .and_then(|m| m.checked_add(minute))
            .ok_or(TimeError::OutOfRange(u32::MAX))?;
        if minute >= 60 {
            return Err(TimeError::OutOfRange(total));
        }
        Self::from_minutes(total)
    }

    /// Parses `HH:MM` or `HH:MM:SS`. Seconds are truncated.
    pub fn parse(value: &str) -> Result<Self, TimeError> {
        let trimmed = value.trim();
        let parsed = NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .map_err(|_| TimeError::Malformed(value.to_string()))?;
        Ok(Self((parsed.hour() * 60 + parsed.minute()) as u16))
    }

    pub const fn minutes(self) -> u16 {
        self.0
    }

    pub const fn hour(self) -> u16 {
        self.0 / 60
    }

    pub const fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Returns `self + minutes`, or `None` past the end of the day.
    pub fn checked_add_minutes(self, minutes: u16) -> Option<Self> {
        let total = self.0.checked_add(minutes)?;
        (total < MINUTES_PER_DAY).then_some(Self(total))
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

// =============================================================================
// ClockTime Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ClockTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        ClockTime::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hours_and_minutes() {
        let t = ClockTime::parse("07:45").unwrap();
        assert_eq!(t.minutes(), 7 * 60 + 45);
        assert_eq!(t.hour(), 7);
        assert_eq!(t.minute(), 45);
    }

    #[test]
    fn parses_with_seconds() {
        assert_eq!(
            ClockTime::parse("13:10:59").unwrap(),
            ClockTime::from_hm(13, 10).unwrap()
        );
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(ClockTime::parse(" 09:00 ").unwrap().minutes(), 540);
    }

    #[test]
    fn rejects_garbage() {
        for raw in ["", "9h", "25:00", "10:61", "ten"] {
            assert!(
                matches!(ClockTime::parse(raw), Err(TimeError::Malformed(_))),
                "{raw:?} should not parse"
            );
        }
    }

    #[test]
    fn from_minutes_rejects_end_of_day() {
        assert_eq!(
            ClockTime::from_minutes(1440),
            Err(TimeError::OutOfRange(1440))
        );
        assert!(ClockTime::from_minutes(1439).is_ok());
    }

    #[test]
    fn from_hm_rejects_huge_hours() {
        assert_eq!(
            ClockTime::from_hm(u32::MAX, 0),
            Err(TimeError::OutOfRange(u32::MAX))
        );
        assert_eq!(
            ClockTime::from_hm(24, 0),
            Err(TimeError::OutOfRange(1440))
        );
        assert!(matches!(
            ClockTime::from_hm(8, 60),
            Err(TimeError::OutOfRange(540))
        ));
    }

    #[test]
    fn checked_add_stops_at_midnight() {
        let t = ClockTime::from_hm(23, 30).unwrap();
        assert_eq!(t.checked_add_minutes(29).map(|t| t.minutes()), Some(1439));
        assert_eq!(t.checked_add_minutes(30), None);
    }

    #[test]
    fn display_zero_pads() {
        assert_eq!(ClockTime::from_hm(7, 5).unwrap().to_string(), "07:05");
        assert_eq!(ClockTime::MIDNIGHT.to_string(), "00:00");
    }
}
