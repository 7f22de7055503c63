//! Day × time-slot projection of effective schedules.
//!
//! The grid is derived from the same [`SubjectSchedule`](crate::schedule::SubjectSchedule)
//! values the conflict detector consumes and uses the same half-open
//! interval test, so a cell shows as conflicted exactly when two blocks
//! share that slot.

mod layout;
mod projection;

#[cfg(test)]
mod tests;

pub use layout::GridLayout;
pub use projection::{CellState, GridEntry, Projection, ScheduleGrid};
