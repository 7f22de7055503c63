//! Half-open weekly interval arithmetic.

use std::fmt::Display;

use qtty::{Hour, Minute, Quantity};

use super::{ClockTime, DayOfWeek, TimeError};

/// Recurring range `[start, end)` on a single teaching day.
///
/// Ordering is by day, then start, then end, which is the order schedule
/// grids and slot groupings are presented in.
///
/// # Examples
///
/// ```
/// use classgrid::time::{ClockTime, DayOfWeek, WeeklyInterval};
///
/// let at = |h| ClockTime::from_hm(h, 0).unwrap();
/// let a = WeeklyInterval::new(DayOfWeek::Monday, at(8), at(10)).unwrap();
/// let b = WeeklyInterval::new(DayOfWeek::Monday, at(9), at(11)).unwrap();
/// let c = WeeklyInterval::new(DayOfWeek::Monday, at(10), at(12)).unwrap();
///
/// assert_eq!(a.overlap_minutes(&b), 60);
/// // Back-to-back blocks share no minute.
/// assert!(!a.overlaps(&c));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeeklyInterval {
    day: DayOfWeek,
    start: ClockTime,
    end: ClockTime,
}

impl WeeklyInterval {
    /// Creates `[start, end)` on `day`.
    ///
    /// # Errors
    ///
    /// [`TimeError::EmptyInterval`] unless `start < end`.
    pub fn new(day: DayOfWeek, start: ClockTime, end: ClockTime) -> Result<Self, TimeError> {
        if start >= end {
            return Err(TimeError::EmptyInterval { start, end });
        }
        Ok(Self { day, start, end })
    }

    /// Parses raw `HH:MM[:SS]` strings into an interval on `day`.
    pub fn parse(day: DayOfWeek, start: &str, end: &str) -> Result<Self, TimeError> {
        Self::new(day, ClockTime::parse(start)?, ClockTime::parse(end)?)
    }

    pub const fn day(&self) -> DayOfWeek {
        self.day
    }

    pub const fn start(&self) -> ClockTime {
        self.start
    }

    pub const fn end(&self) -> ClockTime {
        self.end
    }

    pub fn duration_minutes(&self) -> u32 {
        u32::from(self.end.minutes() - self.start.minutes())
    }

    pub fn duration(&self) -> Quantity<Minute> {
        Quantity::new(f64::from(self.duration_minutes()))
    }

    pub fn duration_hours(&self) -> Quantity<Hour> {
        self.duration().to::<Hour>()
    }

    /// Returns true if `time` on `day` falls in `[start, end)`.
    pub fn contains(&self, day: DayOfWeek, time: ClockTime) -> bool {
        self.day == day && self.start <= time && time < self.end
    }

    /// Checks if this interval shares at least one minute with `other`.
    ///
    /// Intervals on different days never overlap.
    pub fn overlaps(&self, other: &WeeklyInterval) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }

    /// Common part of both intervals, if they overlap.
    pub fn intersection(&self, other: &WeeklyInterval) -> Option<WeeklyInterval> {
        if !self.overlaps(other) {
            return None;
        }
        Some(WeeklyInterval {
            day: self.day,
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        })
    }

    /// Minutes shared with `other`; zero when they do not overlap.
    pub fn overlap_minutes(&self, other: &WeeklyInterval) -> u32 {
        self.intersection(other)
            .map(|common| common.duration_minutes())
            .unwrap_or(0)
    }

    /// Shared duration as a typed quantity, if the intervals overlap.
    pub fn overlap(&self, other: &WeeklyInterval) -> Option<Quantity<Minute>> {
        self.intersection(other).map(|common| common.duration())
    }
}

impl Display for WeeklyInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}-{}", self.day, self.start, self.end)
    }
}
