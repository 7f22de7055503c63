//! Bookkeeping for blocks left out of a recomputation.

use std::fmt;

use tracing::warn;

use crate::Id;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a block was left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SkipReason {
    /// Start or end time did not parse, or start was not before end.
    MalformedTime,
    /// The block, or its class enrollment, names a subject or class absent
    /// from the snapshot.
    MissingReference,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MalformedTime => write!(f, "malformed time"),
            SkipReason::MissingReference => write!(f, "missing reference"),
        }
    }
}

/// One skipped record.
///
/// `block_id` is `None` when a whole enrollment was dropped because its
/// subject does not exist and there were no blocks to name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SkippedBlock {
    pub block_id: Option<Id>,
    pub subject_id: Id,
    pub class_id: Option<Id>,
    pub reason: SkipReason,
    pub detail: String,
}

/// Blocks excluded from detection, analysis or projection.
///
/// Skips never abort a recomputation; this report exists so they are not
/// silently swallowed. Recording the same block twice for the same reason is
/// a no-op, so reports from several consumers of one schedule can be merged
/// without double counting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkipReport {
    entries: Vec<SkippedBlock>,
}

impl SkipReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a skip and logs it. Returns false if it was already recorded.
    pub fn record(&mut self, skipped: SkippedBlock) -> bool {
        if self.entries.contains(&skipped) {
            return false;
        }
        warn!(
            block_id = skipped.block_id.as_deref().unwrap_or("-"),
            subject_id = %skipped.subject_id,
            class_id = skipped.class_id.as_deref().unwrap_or("-"),
            reason = %skipped.reason,
            detail = %skipped.detail,
            "skipping schedule block"
        );
        self.entries.push(skipped);
        true
    }

    /// Folds `other` into this report, dropping duplicates.
    pub fn merge(&mut self, other: SkipReport) {
        for entry in other.entries {
            if !self.entries.contains(&entry) {
                self.entries.push(entry);
            }
        }
    }

    pub fn entries(&self) -> &[SkippedBlock] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, reason: SkipReason) -> usize {
        self.entries.iter().filter(|e| e.reason == reason).count()
    }

    pub fn malformed_time_count(&self) -> usize {
        self.count(SkipReason::MalformedTime)
    }

    pub fn missing_reference_count(&self) -> usize {
        self.count(SkipReason::MissingReference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skipped(block: &str, reason: SkipReason) -> SkippedBlock {
        SkippedBlock {
            block_id: Some(block.to_string()),
            subject_id: "s1".to_string(),
            class_id: None,
            reason,
            detail: String::new(),
        }
    }

    #[test]
    fn record_ignores_duplicates() {
        let mut report = SkipReport::new();
        assert!(report.record(skipped("b1", SkipReason::MalformedTime)));
        assert!(!report.record(skipped("b1", SkipReason::MalformedTime)));
        assert!(report.record(skipped("b1", SkipReason::MissingReference)));
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn counts_by_reason() {
        let mut report = SkipReport::new();
        report.record(skipped("b1", SkipReason::MalformedTime));
        report.record(skipped("b2", SkipReason::MalformedTime));
        report.record(skipped("b3", SkipReason::MissingReference));
        assert_eq!(report.malformed_time_count(), 2);
        assert_eq!(report.missing_reference_count(), 1);
    }

    #[test]
    fn merge_drops_overlap() {
        let mut a = SkipReport::new();
        a.record(skipped("b1", SkipReason::MalformedTime));
        let mut b = SkipReport::new();
        b.record(skipped("b1", SkipReason::MalformedTime));
        b.record(skipped("b2", SkipReason::MalformedTime));
        a.merge(b);
        assert_eq!(a.len(), 2);
    }
}
