use std::fmt;

use crate::model::Subject;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which subject pairs a detection pass compares.
///
/// The two modes answer different questions and are never blended: the
/// caller picks the one that fits its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DetectionMode {
    /// Every pair of distinct subjects assigned to the class is compared.
    #[default]
    AllPairsWithinClass,
    /// Only subjects from different curriculum periods are compared, as when
    /// checking that students retaking a subject from another period can
    /// attend both.
    CrossPeriodOnly,
}

impl DetectionMode {
    /// Returns true if blocks of `a` and `b` should be compared.
    pub fn admits(self, a: &Subject, b: &Subject) -> bool {
        if a.id == b.id {
            return false;
        }
        match self {
            DetectionMode::AllPairsWithinClass => true,
            DetectionMode::CrossPeriodOnly => a.period != b.period,
        }
    }
}

impl fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionMode::AllPairsWithinClass => write!(f, "all pairs within class"),
            DetectionMode::CrossPeriodOnly => write!(f, "cross-period only"),
        }
    }
}
