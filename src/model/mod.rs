//! Snapshot records handed over by the surrounding application.
//!
//! These mirror the external store's rows: subjects with their default weekly
//! blocks, class groups with enrolled subjects and per-subject schedule
//! overrides. Time values stay as raw strings and are parsed on demand so a
//! single malformed row never rejects a whole snapshot.

mod block;
mod class_group;
mod error;
mod snapshot;
mod subject;

pub use block::{BlockKind, WeeklyTimeBlock};
pub use class_group::{ClassGroup, ScheduleOverride};
pub use error::ModelError;
pub use snapshot::ScheduleSnapshot;
pub use subject::{Period, Subject};
