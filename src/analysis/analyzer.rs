//! Slot grouping and workload-percentage classification.

use std::collections::{BTreeMap, BTreeSet};

use qtty::{Hour, Quantity};
use tracing::debug;

use super::AcceptanceLedger;
use crate::conflicts::DetectionMode;
use crate::schedule::{AssignmentKey, SkipReport, SubjectSchedule, TimedBlock};
use crate::time::WeeklyInterval;
use crate::Id;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest share of a subject's workload a conflict may take and still be
/// acceptable without explicit user action (inclusive).
pub const CONFLICT_THRESHOLD: f64 = 0.25;

/// Slack for floating point noise from unit conversion, so exact quarters
/// (2h out of 8h) land inside the threshold.
const THRESHOLD_TOLERANCE: f64 = 1e-9;

/// Returns true if `percentage` (a fraction, 0.25 = 25%) is within
/// [`CONFLICT_THRESHOLD`].
pub fn is_within_threshold(percentage: f64) -> bool {
    percentage <= CONFLICT_THRESHOLD + THRESHOLD_TOLERANCE
}

/// Share of `total` workload consumed by `overlap`.
///
/// A subject with no usable workload (zero, negative or not finite) is fully
/// consumed by any positive overlap (1.0).
pub fn workload_share(overlap: Quantity<Hour>, total: Quantity<Hour>) -> f64 {
    if !total.value().is_finite() || total.value() <= 0.0 {
        return if overlap.value() > 0.0 { 1.0 } else { 0.0 };
    }
    overlap.value() / total.value()
}

/// Per-pair figures of a slot analysis. `subject_a < subject_b` by id.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PairDetail {
    pub subject_a: Id,
    pub subject_a_name: String,
    pub subject_b: Id,
    pub subject_b_name: String,
    pub overlap_hours: Quantity<Hour>,
    /// Overlap as a share of subject A's total workload.
    pub percentage_a: f64,
    /// Overlap as a share of subject B's total workload.
    pub percentage_b: f64,
    /// The worse of the two.
    pub percentage: f64,
}

impl PairDetail {
    pub fn exceeds_threshold(&self) -> bool {
        !is_within_threshold(self.percentage)
    }
}

/// Whether the user accepted the slot's conflict for one assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AssignmentAcceptance {
    pub assignment: AssignmentKey,
    pub accepted_by_user: bool,
}

/// Severity judgment for one weekly slot shared by several subjects.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ConflictAnalysis {
    pub slot: WeeklyInterval,
    /// Distinct subjects in the slot, sorted.
    pub involved_subject_ids: Vec<Id>,
    /// Every assignment in the slot, sorted, with its acceptance state.
    pub assignments: Vec<AssignmentAcceptance>,
    /// Worst pair percentage in the slot.
    pub overlap_percentage: f64,
    pub is_within_threshold: bool,
    pub per_pair_detail: Vec<PairDetail>,
}

impl ConflictAnalysis {
    pub fn accepted_by_user(&self, assignment: &AssignmentKey) -> Option<bool> {
        self.assignments
            .iter()
            .find(|a| a.assignment == *assignment)
            .map(|a| a.accepted_by_user)
    }

    pub fn all_accepted(&self) -> bool {
        self.assignments.iter().all(|a| a.accepted_by_user)
    }

    /// Over threshold and not accepted for every implicated assignment.
    pub fn is_blocking(&self) -> bool {
        !self.is_within_threshold && !self.all_accepted()
    }

    pub fn unaccepted(&self) -> impl Iterator<Item = &AssignmentKey> + '_ {
        self.assignments
            .iter()
            .filter(|a| !a.accepted_by_user)
            .map(|a| &a.assignment)
    }
}

/// Output of one analysis pass.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    /// One entry per shared slot, in week order.
    pub analyses: Vec<ConflictAnalysis>,
    pub skipped: SkipReport,
}

impl Analysis {
    pub fn blocking(&self) -> impl Iterator<Item = &ConflictAnalysis> + '_ {
        self.analyses.iter().filter(|a| a.is_blocking())
    }

    pub fn has_blocking(&self) -> bool {
        self.blocking().next().is_some()
    }
}

/// Groups assignments by identical weekly slot and classifies each slot.
///
/// Only subject pairs the [`DetectionMode`] admits are classified, so the
/// analysis never judges a pair the detector left out.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictAnalyzer {
    mode: DetectionMode,
}

impl ConflictAnalyzer {
    pub fn new(mode: DetectionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> DetectionMode {
        self.mode
    }

    pub fn analyze(&self, schedules: &[SubjectSchedule<'_>], ledger: &AcceptanceLedger) -> Analysis {
        let mut skipped = SkipReport::new();
        let timed: Vec<Vec<TimedBlock<'_>>> = schedules
            .iter()
            .map(|schedule| schedule.timed_blocks(&mut skipped))
            .collect();

        let mut slots: BTreeMap<WeeklyInterval, Vec<(&SubjectSchedule<'_>, &TimedBlock<'_>)>> =
            BTreeMap::new();
        for (schedule, blocks) in schedules.iter().zip(&timed) {
            for block in blocks {
                slots.entry(block.interval).or_default().push((schedule, block));
            }
        }

        let analyses: Vec<ConflictAnalysis> = slots
            .into_iter()
            .filter(|(_, occupants)| occupants.len() >= 2)
            .filter_map(|(slot, occupants)| analyze_slot(self.mode, slot, &occupants, ledger))
            .collect();

        debug!(
            mode = %self.mode,
            assignments = schedules.len(),
            shared_slots = analyses.len(),
            over_threshold = analyses.iter().filter(|a| !a.is_within_threshold).count(),
            skipped = skipped.len(),
            "conflict analysis finished"
        );

        Analysis { analyses, skipped }
    }
}

fn analyze_slot(
    mode: DetectionMode,
    slot: WeeklyInterval,
    occupants: &[(&SubjectSchedule<'_>, &TimedBlock<'_>)],
    ledger: &AcceptanceLedger,
) -> Option<ConflictAnalysis> {
    let mut seen_pairs = BTreeSet::new();
    let mut per_pair_detail = Vec::new();

    for (i, (a, a_block)) in occupants.iter().enumerate() {
        for (b, b_block) in &occupants[i + 1..] {
            if !mode.admits(a.subject, b.subject) {
                continue;
            }
            let (a, b) = if a.subject.id < b.subject.id { (a, b) } else { (b, a) };
            if !seen_pairs.insert((a.subject.id.as_str(), b.subject.id.as_str())) {
                continue;
            }
            let Some(overlap) = a_block.interval.overlap(&b_block.interval) else {
                continue;
            };
            let overlap_hours = overlap.to::<Hour>();
            let percentage_a = workload_share(overlap_hours, a.subject.total_workload());
            let percentage_b = workload_share(overlap_hours, b.subject.total_workload());
            per_pair_detail.push(PairDetail {
                subject_a: a.subject.id.clone(),
                subject_a_name: a.subject.name.clone(),
                subject_b: b.subject.id.clone(),
                subject_b_name: b.subject.name.clone(),
                overlap_hours,
                percentage_a,
                percentage_b,
                percentage: percentage_a.max(percentage_b),
            });
        }
    }

    if per_pair_detail.is_empty() {
        return None;
    }

    let overlap_percentage = per_pair_detail
        .iter()
        .map(|p| p.percentage)
        .fold(0.0, f64::max);
    let involved: BTreeSet<&str> = per_pair_detail
        .iter()
        .flat_map(|p| [p.subject_a.as_str(), p.subject_b.as_str()])
        .collect();
    let involved_subject_ids: Vec<Id> = involved.iter().map(|id| id.to_string()).collect();
    let assignments: Vec<AssignmentAcceptance> = occupants
        .iter()
        .filter(|(s, _)| involved.contains(s.subject.id.as_str()))
        .map(|(s, _)| s.assignment_key())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|assignment| AssignmentAcceptance {
            accepted_by_user: ledger.is_accepted(&assignment),
            assignment,
        })
        .collect();

    Some(ConflictAnalysis {
        slot,
        involved_subject_ids,
        assignments,
        overlap_percentage,
        is_within_threshold: is_within_threshold(overlap_percentage),
        per_pair_detail,
    })
}
