//! Weekly time arithmetic.
//!
//! Times of day are plain minute counts since midnight ([`ClockTime`]); no
//! calendar dates are involved, so comparisons are immune to time zones and
//! DST. A [`WeeklyInterval`] is a half-open `[start, end)` range on one
//! [`DayOfWeek`]: intervals that merely touch do not overlap, and intervals on
//! different days never overlap.

mod clock;
mod day;
mod error;
mod interval;

pub use clock::{ClockTime, MINUTES_PER_DAY};
pub use day::DayOfWeek;
pub use error::TimeError;
pub use interval::WeeklyInterval;
