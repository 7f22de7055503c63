use tracing::debug;

use super::{Conflict, ConflictSide, DetectionMode};
use crate::schedule::{SkipReport, SubjectSchedule, TimedBlock};

/// Output of one detection pass.
#[derive(Debug, Clone, Default)]
pub struct Detection {
    /// One entry per overlapping block pair, ordered by day, start and key.
    pub conflicts: Vec<Conflict>,
    /// Blocks left out because their times did not parse.
    pub skipped: SkipReport,
}

/// Pairwise overlap scan over effective subject schedules.
///
/// Every admitted pair of schedules (see [`DetectionMode::admits`]) has each
/// of its block pairs tested with the half-open overlap predicate. Cost is
/// O(S² · B²) for S subjects of B blocks, which is small for a curriculum.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictDetector {
    mode: DetectionMode,
}

impl ConflictDetector {
    pub fn new(mode: DetectionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> DetectionMode {
        self.mode
    }

    /// Detects every conflict among `schedules`.
    pub fn detect(&self, schedules: &[SubjectSchedule<'_>]) -> Detection {
        let mut skipped = SkipReport::new();
        let timed: Vec<Vec<TimedBlock<'_>>> = schedules
            .iter()
            .map(|schedule| schedule.timed_blocks(&mut skipped))
            .collect();

        let mut conflicts = Vec::new();
        for i in 0..schedules.len() {
            for j in (i + 1)..schedules.len() {
                let (a, b) = (&schedules[i], &schedules[j]);
                if !self.mode.admits(a.subject, b.subject) {
                    continue;
                }
                for x in &timed[i] {
                    for y in &timed[j] {
                        if !x.interval.overlaps(&y.interval) {
                            continue;
                        }
                        if let Some(conflict) = Conflict::between(
                            side(a, x),
                            &x.interval,
                            side(b, y),
                            &y.interval,
                        ) {
                            conflicts.push(conflict);
                        }
                    }
                }
            }
        }

        conflicts.sort_by(|p, q| p.window.cmp(&q.window).then_with(|| p.key().cmp(&q.key())));
        conflicts.dedup();

        debug!(
            mode = %self.mode,
            subjects = schedules.len(),
            conflicts = conflicts.len(),
            skipped = skipped.len(),
            "conflict detection finished"
        );

        Detection { conflicts, skipped }
    }
}

fn side(schedule: &SubjectSchedule<'_>, timed: &TimedBlock<'_>) -> ConflictSide {
    ConflictSide {
        subject_id: schedule.subject.id.clone(),
        subject_name: schedule.subject.name.clone(),
        period: schedule.subject.period,
        class_id: schedule.class_id.clone(),
        block: timed.block.clone(),
    }
}
