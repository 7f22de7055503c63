//! Per-assignment effective schedules gathered from a snapshot.

use std::collections::BTreeSet;
use std::fmt;

use super::skip::{SkipReason, SkipReport, SkippedBlock};
use super::resolve_effective_schedule;
use crate::model::{ClassGroup, ScheduleSnapshot, Subject, WeeklyTimeBlock};
use crate::time::WeeklyInterval;
use crate::Id;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A subject as taken by one class; the unit conflicts are accepted for.
///
/// `class_id` is `None` for a subject considered on its own defaults, outside
/// any class.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AssignmentKey {
    pub subject_id: Id,
    pub class_id: Option<Id>,
}

impl AssignmentKey {
    pub fn new(subject_id: impl Into<Id>, class_id: Option<Id>) -> Self {
        Self {
            subject_id: subject_id.into(),
            class_id,
        }
    }

    pub fn for_class(subject_id: impl Into<Id>, class_id: impl Into<Id>) -> Self {
        Self::new(subject_id, Some(class_id.into()))
    }
}

impl fmt::Display for AssignmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.class_id {
            Some(class_id) => write!(f, "{}@{}", self.subject_id, class_id),
            None => write!(f, "{}", self.subject_id),
        }
    }
}

/// Where an effective schedule came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScheduleSource {
    /// Subject defaults scoped to a class.
    SubjectDefault,
    /// An active class override.
    ClassOverride,
    /// Subject defaults outside any class.
    Unscoped,
}

/// Effective weekly blocks of one subject assignment.
#[derive(Debug, Clone)]
pub struct SubjectSchedule<'a> {
    pub subject: &'a Subject,
    pub class_id: Option<Id>,
    pub source: ScheduleSource,
    pub blocks: Vec<WeeklyTimeBlock>,
}

/// A block paired with its parsed interval.
#[derive(Debug, Clone, Copy)]
pub struct TimedBlock<'s> {
    pub block: &'s WeeklyTimeBlock,
    pub interval: WeeklyInterval,
}

impl<'a> SubjectSchedule<'a> {
    /// Resolves the schedule `class` follows for `subject`.
    pub fn for_class(class: &ClassGroup, subject: &'a Subject) -> Self {
        let source = if class.active_override(&subject.id).is_some() {
            ScheduleSource::ClassOverride
        } else {
            ScheduleSource::SubjectDefault
        };
        Self {
            subject,
            class_id: Some(class.id.clone()),
            source,
            blocks: resolve_effective_schedule(class, &subject.id, Some(subject)),
        }
    }

    /// The subject's own default blocks, outside any class.
    pub fn unscoped(subject: &'a Subject) -> Self {
        Self {
            subject,
            class_id: None,
            source: ScheduleSource::Unscoped,
            blocks: subject.default_blocks().cloned().collect(),
        }
    }

    pub fn assignment_key(&self) -> AssignmentKey {
        AssignmentKey::new(self.subject.id.clone(), self.class_id.clone())
    }

    /// Blocks whose times parse, with their intervals. Blocks that do not
    /// parse are recorded in `skipped` and left out.
    pub fn timed_blocks(&self, skipped: &mut SkipReport) -> Vec<TimedBlock<'_>> {
        let mut timed = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            match block.interval() {
                Ok(interval) => timed.push(TimedBlock { block, interval }),
                Err(e) => {
                    skipped.record(SkippedBlock {
                        block_id: Some(block.id.clone()),
                        subject_id: self.subject.id.clone(),
                        class_id: self.class_id.clone(),
                        reason: SkipReason::MalformedTime,
                        detail: e.to_string(),
                    });
                }
            }
        }
        timed
    }

    /// Drops blocks that refer to subjects or classes missing from
    /// `snapshot`, recording each one.
    fn retain_resolvable(&mut self, snapshot: &ScheduleSnapshot, skipped: &mut SkipReport) {
        let subject_id = &self.subject.id;
        let class_id = &self.class_id;
        self.blocks.retain(|block| {
            if snapshot.resolves_references(block) {
                return true;
            }
            skipped.record(SkippedBlock {
                block_id: Some(block.id.clone()),
                subject_id: subject_id.clone(),
                class_id: class_id.clone(),
                reason: SkipReason::MissingReference,
                detail: format!(
                    "block refers to subject {} / class {}",
                    block.subject_id,
                    block.class_id.as_deref().unwrap_or("-")
                ),
            });
            false
        });
    }
}

/// Effective schedules of every subject `class` is enrolled in.
///
/// Enrollments naming a subject absent from `snapshot` are skipped (together
/// with any override blocks stored for them), as are blocks whose own
/// references do not resolve. Results follow the class's subject id order.
pub fn collect_class_schedules<'a>(
    snapshot: &'a ScheduleSnapshot,
    class: &ClassGroup,
) -> (Vec<SubjectSchedule<'a>>, SkipReport) {
    let mut skipped = SkipReport::new();
    let mut schedules = Vec::with_capacity(class.subject_ids.len());

    for subject_id in &class.subject_ids {
        match snapshot.subject(subject_id) {
            Some(subject) => {
                let mut schedule = SubjectSchedule::for_class(class, subject);
                schedule.retain_resolvable(snapshot, &mut skipped);
                schedules.push(schedule);
            }
            None => skip_unknown_subject(class, subject_id, &mut skipped),
        }
    }

    (schedules, skipped)
}

/// Effective schedules for an arbitrary set of assignments, possibly drawn
/// from several classes. Duplicate keys are considered once.
pub fn collect_selection<'a>(
    snapshot: &'a ScheduleSnapshot,
    selection: &[AssignmentKey],
) -> (Vec<SubjectSchedule<'a>>, SkipReport) {
    let mut skipped = SkipReport::new();
    let mut seen = BTreeSet::new();
    let mut schedules = Vec::with_capacity(selection.len());

    for key in selection {
        if !seen.insert(key) {
            continue;
        }
        let Some(subject) = snapshot.subject(&key.subject_id) else {
            skipped.record(missing_assignment(key, "subject not in snapshot"));
            continue;
        };
        let mut schedule = match key.class_id.as_deref() {
            Some(class_id) => match snapshot.class(class_id) {
                Some(class) => SubjectSchedule::for_class(class, subject),
                None => {
                    skipped.record(missing_assignment(key, "class not in snapshot"));
                    continue;
                }
            },
            None => SubjectSchedule::unscoped(subject),
        };
        schedule.retain_resolvable(snapshot, &mut skipped);
        schedules.push(schedule);
    }

    (schedules, skipped)
}

fn skip_unknown_subject(class: &ClassGroup, subject_id: &str, skipped: &mut SkipReport) {
    let detail = format!("class {} enrolls unknown subject", class.id);
    let orphaned: Vec<&WeeklyTimeBlock> = class
        .override_for(subject_id)
        .map(|o| o.blocks().collect())
        .unwrap_or_default();

    if orphaned.is_empty() {
        skipped.record(SkippedBlock {
            block_id: None,
            subject_id: subject_id.to_string(),
            class_id: Some(class.id.clone()),
            reason: SkipReason::MissingReference,
            detail,
        });
        return;
    }
    for block in orphaned {
        skipped.record(SkippedBlock {
            block_id: Some(block.id.clone()),
            subject_id: subject_id.to_string(),
            class_id: Some(class.id.clone()),
            reason: SkipReason::MissingReference,
            detail: detail.clone(),
        });
    }
}

fn missing_assignment(key: &AssignmentKey, detail: &str) -> SkippedBlock {
    SkippedBlock {
        block_id: None,
        subject_id: key.subject_id.clone(),
        class_id: key.class_id.clone(),
        reason: SkipReason::MissingReference,
        detail: detail.to_string(),
    }
}
