//! Weekly recurring class blocks.

use std::fmt;

use qtty::{Hour, Quantity};

use crate::time::{DayOfWeek, TimeError, WeeklyInterval};
use crate::Id;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Teaching format of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BlockKind {
    Theoretical,
    Practical,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Theoretical => write!(f, "theoretical"),
            BlockKind::Practical => write!(f, "practical"),
        }
    }
}

/// A recurring weekly class occurrence.
///
/// `start_time` and `end_time` hold the store's raw `HH:MM[:SS]` strings;
/// [`interval`](Self::interval) parses them. `workload_hours` is entered
/// independently of the clock duration and is the figure credited to the
/// subject's workload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WeeklyTimeBlock {
    pub id: Id,
    pub subject_id: Id,
    /// Set when the block belongs to a class-specific override.
    #[cfg_attr(feature = "serde", serde(default))]
    pub class_id: Option<Id>,
    pub kind: BlockKind,
    pub day_of_week: DayOfWeek,
    pub start_time: String,
    pub end_time: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub workload_hours: f64,
}

impl WeeklyTimeBlock {
    pub fn new(
        id: impl Into<Id>,
        subject_id: impl Into<Id>,
        kind: BlockKind,
        day_of_week: DayOfWeek,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            subject_id: subject_id.into(),
            class_id: None,
            kind,
            day_of_week,
            start_time: start_time.into(),
            end_time: end_time.into(),
            location: String::new(),
            workload_hours: 0.0,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_workload_hours(mut self, hours: f64) -> Self {
        self.workload_hours = hours;
        self
    }

    pub fn with_class(mut self, class_id: impl Into<Id>) -> Self {
        self.class_id = Some(class_id.into());
        self
    }

    /// Parses the raw wall-clock strings into a half-open weekly interval.
    ///
    /// # Errors
    ///
    /// [`TimeError::Malformed`] for unparseable values and
    /// [`TimeError::EmptyInterval`] unless start precedes end.
    pub fn interval(&self) -> Result<WeeklyInterval, TimeError> {
        WeeklyInterval::parse(self.day_of_week, &self.start_time, &self.end_time)
    }

    pub fn workload(&self) -> Quantity<Hour> {
        Quantity::new(self.workload_hours)
    }

    /// Copy of this block stamped with `class_id`, keeping its id.
    pub fn stamped(&self, class_id: &str) -> Self {
        Self {
            class_id: Some(class_id.to_string()),
            ..self.clone()
        }
    }

    /// Copy of this block for one class rendering, with a per-class id
    /// (`<id>-<class_id>`) so the same default block stays distinguishable
    /// across classes.
    pub fn scoped_to_class(&self, class_id: &str) -> Self {
        Self {
            id: format!("{}-{}", self.id, class_id),
            class_id: Some(class_id.to_string()),
            ..self.clone()
        }
    }
}
