//! Threshold-based conflict analysis for the schedule builder.
//!
//! Assignments that sit in exactly the same weekly slot (same day, start and
//! end) are grouped together. For every pair of different subjects in a slot
//! the overlap is expressed as a share of each subject's total workload and
//! the larger share is kept. A slot whose worst pair stays at or below
//! [`CONFLICT_THRESHOLD`] is informational; above it, saving is blocked until
//! the user accepts the conflict for every implicated assignment.
//!
//! Acceptance is recorded per (subject, class) assignment in an
//! [`AcceptanceLedger`] and is never implied by the threshold.

mod acceptance;
mod analyzer;
mod validation;


pub use acceptance::AcceptanceLedger;
pub use analyzer::{
    is_within_threshold, workload_share, Analysis, AssignmentAcceptance, ConflictAnalysis,
    ConflictAnalyzer, PairDetail, CONFLICT_THRESHOLD,
};
pub use validation::{validate_save, OffendingPair, ValidationError};
