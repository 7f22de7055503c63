//! classgrid - weekly class-schedule conflict detection.
//!
//! Resolves the effective weekly schedule of each (class group, subject)
//! assignment, detects overlapping time blocks between subjects, classifies
//! overlaps against a workload-percentage threshold and projects schedules
//! onto a day x time-slot grid.
//!
//! Every computation works on a [`model::ScheduleSnapshot`] supplied by the
//! caller and is recomputed from scratch on each call; nothing is cached.

pub mod analysis;
pub mod config;
pub mod conflicts;
pub mod engine;
pub mod grid;
pub mod model;
pub mod schedule;
pub mod time;

pub use analysis::{AcceptanceLedger, ConflictAnalysis, ConflictAnalyzer, CONFLICT_THRESHOLD};
pub use config::EngineConfig;
pub use conflicts::{Conflict, ConflictDetector, DetectionMode};
pub use engine::{ClassReport, ScheduleEngine};
pub use model::{ClassGroup, ScheduleOverride, ScheduleSnapshot, Subject, WeeklyTimeBlock};

/// Identifier type used for subjects, class groups and time blocks.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}
