//! Row and column markers of a schedule grid.

use crate::time::{ClockTime, DayOfWeek, TimeError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered day columns and time-slot rows of a grid.
///
/// # Examples
///
/// ```
/// use classgrid::grid::GridLayout;
///
/// let layout = GridLayout::default();
/// assert_eq!(layout.days().len(), 6);
/// assert_eq!(layout.slots().first().unwrap().to_string(), "07:00");
/// assert_eq!(layout.slots().last().unwrap().to_string(), "22:00");
/// assert_eq!(layout.slots().len(), 31);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawGridLayout"))]
pub struct GridLayout {
    days: Vec<DayOfWeek>,
    slots: Vec<ClockTime>,
}

impl GridLayout {
    /// Slots every `step_minutes` from `first` through `last`, inclusive.
    ///
    /// # Errors
    ///
    /// [`TimeError::ZeroStep`] for a zero step and
    /// [`TimeError::EmptyInterval`] when `first` comes after `last`.
    pub fn new(
        days: impl IntoIterator<Item = DayOfWeek>,
        first: ClockTime,
        last: ClockTime,
        step_minutes: u16,
    ) -> Result<Self, TimeError> {
        if step_minutes == 0 {
            return Err(TimeError::ZeroStep);
        }
        if first > last {
            return Err(TimeError::EmptyInterval {
                start: first,
                end: last,
            });
        }

        let mut slots = vec![first];
        let mut current = first;
        while let Some(next) = current.checked_add_minutes(step_minutes) {
            if next > last {
                break;
            }
            slots.push(next);
            current = next;
        }

        Ok(Self {
            days: days.into_iter().collect(),
            slots,
        })
    }

    /// Layout with explicit slot markers. Markers are sorted and deduplicated.
    pub fn from_slots(
        days: impl IntoIterator<Item = DayOfWeek>,
        slots: impl IntoIterator<Item = ClockTime>,
    ) -> Self {
        let mut slots: Vec<ClockTime> = slots.into_iter().collect();
        slots.sort_unstable();
        slots.dedup();
        Self {
            days: days.into_iter().collect(),
            slots,
        }
    }

    pub fn days(&self) -> &[DayOfWeek] {
        &self.days
    }

    pub fn slots(&self) -> &[ClockTime] {
        &self.slots
    }

    pub fn day_index(&self, day: DayOfWeek) -> Option<usize> {
        self.days.iter().position(|d| *d == day)
    }

    pub fn slot_index(&self, slot: ClockTime) -> Option<usize> {
        self.slots.binary_search(&slot).ok()
    }

    pub fn cell_count(&self) -> usize {
        self.days.len() * self.slots.len()
    }
}

/// Wire form of [`GridLayout`]; converting it restores the sorted,
/// deduplicated slot order lookups rely on.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawGridLayout {
    days: Vec<DayOfWeek>,
    slots: Vec<ClockTime>,
}

#[cfg(feature = "serde")]
impl From<RawGridLayout> for GridLayout {
    fn from(raw: RawGridLayout) -> Self {
        Self::from_slots(raw.days, raw.slots)
    }
}

impl Default for GridLayout {
    /// Monday to Saturday, every 30 minutes from 07:00 to 22:00.
    fn default() -> Self {
        let slots = (7 * 60..=22 * 60)
            .step_by(30)
            .filter_map(|minutes| ClockTime::from_minutes(minutes).ok());
        Self::from_slots(DayOfWeek::ALL, slots)
    }
}
