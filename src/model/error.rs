use thiserror::Error;

use crate::time::TimeError;
use crate::Id;

/// Errors raised by snapshot lookups, override management and input
/// validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid period {0:?}: expected 1 to 8 or \"special\"")]
    InvalidPeriod(String),

    #[error("Unknown subject: {0}")]
    UnknownSubject(Id),

    #[error("Unknown class group: {0}")]
    UnknownClass(Id),

    #[error("Class {class_id} enrolls unknown subject {subject_id}")]
    DanglingEnrollment { class_id: Id, subject_id: Id },

    #[error("Class {class_id} has no schedule override for subject {subject_id}")]
    MissingOverride { class_id: Id, subject_id: Id },

    #[error("Override for subject {subject_id} belongs to class {found}, not {expected}")]
    OverrideClassMismatch {
        subject_id: Id,
        expected: Id,
        found: Id,
    },

    #[error("Override stored under subject {key} is for subject {subject_id}")]
    OverrideKeyMismatch { key: Id, subject_id: Id },

    #[error("Block {block_id} has an invalid time range: {source}")]
    InvalidBlockTime {
        block_id: Id,
        #[source]
        source: TimeError,
    },

    #[error("Subject {subject_id} has negative total workload ({hours}h)")]
    NegativeWorkload { subject_id: Id, hours: f64 },
}
