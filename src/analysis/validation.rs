//! Save-time validation of analyzed schedules.

use thiserror::Error;

use super::ConflictAnalysis;
use crate::schedule::AssignmentKey;
use crate::time::WeeklyInterval;
use crate::Id;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A subject pair that keeps a schedule from being saved.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OffendingPair {
    pub subject_a: Id,
    pub subject_a_name: String,
    pub subject_b: Id,
    pub subject_b_name: String,
    pub slot: WeeklyInterval,
    pub percentage: f64,
    /// Assignments in the slot still awaiting acceptance.
    pub unaccepted: Vec<AssignmentKey>,
}

/// Recoverable, user-facing validation failure. The in-progress edit is the
/// caller's to keep or discard.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{}", describe_unaccepted(.0))]
    UnacceptedConflicts(Vec<OffendingPair>),
}

impl ValidationError {
    pub fn offending_pairs(&self) -> &[OffendingPair] {
        match self {
            ValidationError::UnacceptedConflicts(pairs) => pairs,
        }
    }
}

fn describe_unaccepted(pairs: &[OffendingPair]) -> String {
    let listed: Vec<String> = pairs
        .iter()
        .map(|p| {
            format!(
                "{} x {} on {} ({:.1}%)",
                p.subject_a_name,
                p.subject_b_name,
                p.slot,
                p.percentage * 100.0
            )
        })
        .collect();
    format!(
        "Schedule has {} unaccepted conflict(s) above the workload threshold: {}",
        pairs.len(),
        listed.join("; ")
    )
}

/// Checks that no slot analysis blocks saving.
///
/// # Errors
///
/// [`ValidationError::UnacceptedConflicts`] listing every over-threshold
/// subject pair in slots not yet accepted for all implicated assignments.
pub fn validate_save(analyses: &[ConflictAnalysis]) -> Result<(), ValidationError> {
    let offending: Vec<OffendingPair> = analyses
        .iter()
        .filter(|analysis| analysis.is_blocking())
        .flat_map(|analysis| {
            let unaccepted: Vec<AssignmentKey> = analysis.unaccepted().cloned().collect();
            analysis
                .per_pair_detail
                .iter()
                .filter(|pair| pair.exceeds_threshold())
                .map(move |pair| OffendingPair {
                    subject_a: pair.subject_a.clone(),
                    subject_a_name: pair.subject_a_name.clone(),
                    subject_b: pair.subject_b.clone(),
                    subject_b_name: pair.subject_b_name.clone(),
                    slot: analysis.slot,
                    percentage: pair.percentage,
                    unaccepted: unaccepted.clone(),
                })
        })
        .collect();

    if offending.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::UnacceptedConflicts(offending))
    }
}
