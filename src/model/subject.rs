//! Subjects (course offerings) and their curriculum period.

use std::fmt;
use std::str::FromStr;

use qtty::{Hour, Quantity};

use super::{ModelError, WeeklyTimeBlock};
use crate::Id;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Curriculum stage a subject belongs to: terms 1 through 8, or the
/// non-numeric special track.
///
/// Serialized as a string (`"1"` .. `"8"`, `"special"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum Period {
    Term(u8),
    Special,
}

impl Period {
    pub const FIRST_TERM: u8 = 1;
    pub const LAST_TERM: u8 = 8;

    /// Creates a numbered term, rejecting values outside `1..=8`.
    pub fn term(n: u8) -> Result<Self, ModelError> {
        if (Self::FIRST_TERM..=Self::LAST_TERM).contains(&n) {
            Ok(Period::Term(n))
        } else {
            Err(ModelError::InvalidPeriod(n.to_string()))
        }
    }

    pub fn is_special(self) -> bool {
        matches!(self, Period::Special)
    }
}

impl FromStr for Period {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("special") {
            return Ok(Period::Special);
        }
        trimmed
            .parse::<u8>()
            .ok()
            .and_then(|n| Period::term(n).ok())
            .ok_or_else(|| ModelError::InvalidPeriod(s.to_string()))
    }
}

impl TryFrom<String> for Period {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Term(n) => write!(f, "{n}"),
            Period::Special => write!(f, "special"),
        }
    }
}

/// An academic course offering with its default weekly schedule.
///
/// The block workloads need not add up to `total_workload_hours`; the
/// difference is unscheduled workload, reported by
/// [`unscheduled_workload`](Self::unscheduled_workload).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Subject {
    pub id: Id,
    pub name: String,
    pub period: Period,
    #[cfg_attr(feature = "serde", serde(default))]
    pub instructor: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub primary_location: String,
    pub total_workload_hours: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_theoretical_blocks: Vec<WeeklyTimeBlock>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_practical_blocks: Vec<WeeklyTimeBlock>,
}

impl Subject {
    pub fn new(
        id: impl Into<Id>,
        name: impl Into<String>,
        period: Period,
        total_workload_hours: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            period,
            instructor: String::new(),
            primary_location: String::new(),
            total_workload_hours,
            default_theoretical_blocks: Vec::new(),
            default_practical_blocks: Vec::new(),
        }
    }

    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = instructor.into();
        self
    }

    pub fn with_primary_location(mut self, location: impl Into<String>) -> Self {
        self.primary_location = location.into();
        self
    }

    /// Appends a default block, filed under theoretical or practical by its
    /// kind.
    pub fn with_block(mut self, block: WeeklyTimeBlock) -> Self {
        match block.kind {
            super::BlockKind::Theoretical => self.default_theoretical_blocks.push(block),
            super::BlockKind::Practical => self.default_practical_blocks.push(block),
        }
        self
    }

    /// Default blocks, theoretical first, each list in its stored order.
    pub fn default_blocks(&self) -> impl Iterator<Item = &WeeklyTimeBlock> + '_ {
        self.default_theoretical_blocks
            .iter()
            .chain(self.default_practical_blocks.iter())
    }

    pub fn has_default_schedule(&self) -> bool {
        self.default_blocks().next().is_some()
    }

    pub fn total_workload(&self) -> Quantity<Hour> {
        Quantity::new(self.total_workload_hours)
    }

    /// Sum of the workload credited by the default blocks.
    pub fn scheduled_workload(&self) -> Quantity<Hour> {
        self.default_blocks()
            .map(WeeklyTimeBlock::workload)
            .fold(Quantity::new(0.0), |acc, hours| acc + hours)
    }

    /// Total workload not covered by default blocks. Negative when blocks
    /// credit more than the total; that is informational, not an error.
    pub fn unscheduled_workload(&self) -> Quantity<Hour> {
        self.total_workload() - self.scheduled_workload()
    }
}
