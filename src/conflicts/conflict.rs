use std::fmt::Display;
use std::hash::{Hash, Hasher};

use qtty::{Hour, Minute, Quantity};

use crate::model::{Period, WeeklyTimeBlock};
use crate::schedule::AssignmentKey;
use crate::time::WeeklyInterval;
use crate::Id;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Order-independent identity of a conflict: the pair of block ids, stored
/// as `(min, max)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConflictKey(Id, Id);

impl ConflictKey {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self(a.to_string(), b.to_string())
        } else {
            Self(b.to_string(), a.to_string())
        }
    }

    pub fn first(&self) -> &str {
        &self.0
    }

    pub fn second(&self) -> &str {
        &self.1
    }
}

/// One of the two blocks in a conflict, with enough of its subject for
/// display.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ConflictSide {
    pub subject_id: Id,
    pub subject_name: String,
    pub period: Period,
    pub class_id: Option<Id>,
    pub block: WeeklyTimeBlock,
}

impl ConflictSide {
    pub fn assignment_key(&self) -> AssignmentKey {
        AssignmentKey::new(self.subject_id.clone(), self.class_id.clone())
    }
}

/// Two blocks of different subjects sharing time on the same day.
///
/// Equality and hashing go through [`ConflictKey`], so the same pair found
/// in either order is the same conflict. `first` is always the side with the
/// smaller block id.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Conflict {
    pub first: ConflictSide,
    pub second: ConflictSide,
    /// The shared part of both intervals.
    pub window: WeeklyInterval,
    pub overlap: Quantity<Minute>,
}

impl Conflict {
    /// Builds the conflict between two blocks, or `None` if their intervals
    /// do not overlap.
    pub fn between(
        a: ConflictSide,
        a_interval: &WeeklyInterval,
        b: ConflictSide,
        b_interval: &WeeklyInterval,
    ) -> Option<Self> {
        let window = a_interval.intersection(b_interval)?;
        let (first, second) = if a.block.id <= b.block.id { (a, b) } else { (b, a) };
        Some(Self {
            first,
            second,
            window,
            overlap: window.duration(),
        })
    }

    pub fn key(&self) -> ConflictKey {
        ConflictKey::new(&self.first.block.id, &self.second.block.id)
    }

    pub fn overlap_minutes(&self) -> u32 {
        self.window.duration_minutes()
    }

    pub fn overlap_hours(&self) -> Quantity<Hour> {
        self.overlap.to::<Hour>()
    }

    pub fn involves_subject(&self, subject_id: &str) -> bool {
        self.first.subject_id == subject_id || self.second.subject_id == subject_id
    }

    pub fn sides(&self) -> [&ConflictSide; 2] {
        [&self.first, &self.second]
    }
}

impl PartialEq for Conflict {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Conflict {}

impl Hash for Conflict {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) x {} ({}): {}, {} min",
            self.first.subject_name,
            self.first.block.kind,
            self.second.subject_name,
            self.second.block.kind,
            self.window,
            self.overlap_minutes()
        )
    }
}
