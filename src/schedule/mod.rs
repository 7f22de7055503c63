//! Effective weekly schedules.
//!
//! [`resolve_effective_schedule`] is the single place where a class's
//! override and a subject's defaults are reconciled. Conflict detection,
//! threshold analysis and grid projection all consume its output through
//! [`SubjectSchedule`], so they cannot disagree about which blocks are in
//! force.

mod collect;
mod resolve;
mod skip;


pub use collect::{collect_class_schedules, collect_selection, AssignmentKey, ScheduleSource, SubjectSchedule, TimedBlock};
pub use resolve::resolve_effective_schedule;
pub use skip::{SkipReason, SkipReport, SkippedBlock};
