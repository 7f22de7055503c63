//! Point-in-time view of subjects and class groups.

use super::{ClassGroup, ModelError, Subject, WeeklyTimeBlock};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Subjects and class groups as last loaded from the store.
///
/// The engine never mutates or caches a snapshot; every recomputation reads
/// whichever snapshot the caller passes in.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ScheduleSnapshot {
    #[cfg_attr(feature = "serde", serde(default))]
    pub subjects: Vec<Subject>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub classes: Vec<ClassGroup>,
}

impl ScheduleSnapshot {
    pub fn new(subjects: Vec<Subject>, classes: Vec<ClassGroup>) -> Self {
        Self { subjects, classes }
    }

    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    pub fn with_class(mut self, class: ClassGroup) -> Self {
        self.classes.push(class);
        self
    }

    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn class(&self, id: &str) -> Option<&ClassGroup> {
        self.classes.iter().find(|c| c.id == id)
    }

    pub fn require_subject(&self, id: &str) -> Result<&Subject, ModelError> {
        self.subject(id)
            .ok_or_else(|| ModelError::UnknownSubject(id.to_string()))
    }

    pub fn require_class(&self, id: &str) -> Result<&ClassGroup, ModelError> {
        self.class(id)
            .ok_or_else(|| ModelError::UnknownClass(id.to_string()))
    }

    /// Returns true if every id the block refers to exists in this snapshot.
    pub fn resolves_references(&self, block: &WeeklyTimeBlock) -> bool {
        self.subject(&block.subject_id).is_some()
            && block
                .class_id
                .as_deref()
                .map_or(true, |class_id| self.class(class_id).is_some())
    }

    /// Checks the snapshot against the input contract and lists every
    /// violation found. An empty list means the snapshot is clean.
    ///
    /// Violations are not fatal: the engine skips the offending blocks and
    /// keeps going. This is for surfacing data problems to whoever maintains
    /// the records.
    pub fn validate(&self) -> Vec<ModelError> {
        let mut issues = Vec::new();

        for subject in &self.subjects {
            if subject.total_workload_hours < 0.0 {
                issues.push(ModelError::NegativeWorkload {
                    subject_id: subject.id.clone(),
                    hours: subject.total_workload_hours,
                });
            }
            collect_time_issues(subject.default_blocks(), &mut issues);
        }

        for class in &self.classes {
            for subject_id in &class.subject_ids {
                if self.subject(subject_id).is_none() {
                    issues.push(ModelError::DanglingEnrollment {
                        class_id: class.id.clone(),
                        subject_id: subject_id.clone(),
                    });
                }
            }
            for (key, schedule_override) in &class.schedule_overrides {
                if *key != schedule_override.subject_id {
                    issues.push(ModelError::OverrideKeyMismatch {
                        key: key.clone(),
                        subject_id: schedule_override.subject_id.clone(),
                    });
                }
                if schedule_override.class_id != class.id {
                    issues.push(ModelError::OverrideClassMismatch {
                        subject_id: schedule_override.subject_id.clone(),
                        expected: class.id.clone(),
                        found: schedule_override.class_id.clone(),
                    });
                }
                collect_time_issues(schedule_override.blocks(), &mut issues);
            }
        }

        issues
    }
}

fn collect_time_issues<'a>(
    blocks: impl Iterator<Item = &'a WeeklyTimeBlock>,
    issues: &mut Vec<ModelError>,
) {
    for block in blocks {
        if let Err(source) = block.interval() {
            issues.push(ModelError::InvalidBlockTime {
                block_id: block.id.clone(),
                source,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockKind, Period, ScheduleOverride};
    use crate::time::{DayOfWeek, TimeError};

    fn block(id: &str, subject: &str, start: &str, end: &str) -> WeeklyTimeBlock {
        WeeklyTimeBlock::new(id, subject, BlockKind::Theoretical, DayOfWeek::Monday, start, end)
    }

    fn snapshot() -> ScheduleSnapshot {
        ScheduleSnapshot::default()
            .with_subject(
                Subject::new("anatomy", "Anatomy", Period::Term(1), 120.0)
                    .with_block(block("a1", "anatomy", "08:00", "10:00")),
            )
            .with_class(ClassGroup::new("1-1", "1-1", Period::Term(1)).with_subject("anatomy"))
    }

    #[test]
    fn lookups() {
        let snapshot = snapshot();
        assert_eq!(snapshot.subject("anatomy").map(|s| s.name.as_str()), Some("Anatomy"));
        assert!(snapshot.class("1-1").is_some());
        assert_eq!(
            snapshot.require_subject("ghost"),
            Err(ModelError::UnknownSubject("ghost".to_string()))
        );
        assert_eq!(
            snapshot.require_class("ghost").map(|c| c.id.clone()),
            Err(ModelError::UnknownClass("ghost".to_string()))
        );
    }

    #[test]
    fn clean_snapshot_has_no_issues() {
        assert!(snapshot().validate().is_empty());
    }

    #[test]
    fn reference_resolution() {
        let snapshot = snapshot();
        assert!(snapshot.resolves_references(&block("x", "anatomy", "08:00", "09:00")));
        assert!(!snapshot.resolves_references(&block("x", "ghost", "08:00", "09:00")));
        assert!(!snapshot
            .resolves_references(&block("x", "anatomy", "08:00", "09:00").with_class("2-9")));
    }

    #[test]
    fn validate_lists_every_violation() {
        let mut class = ClassGroup::new("1-1", "1-1", Period::Term(1))
            .with_subject("anatomy")
            .with_subject("ghost");
        class.schedule_overrides.insert(
            "anatomy".to_string(),
            ScheduleOverride::new("anatomy", "1-1")
                .with_block(block("o1", "anatomy", "11:00", "10:00")),
        );
        class.schedule_overrides.insert(
            "physiology".to_string(),
            ScheduleOverride::new("anatomy", "2-1"),
        );
        let snapshot = ScheduleSnapshot::default()
            .with_subject(
                Subject::new("anatomy", "Anatomy", Period::Term(1), -1.0)
                    .with_block(block("a1", "anatomy", "eight", "10:00")),
            )
            .with_class(class);

        let issues = snapshot.validate();
        assert_eq!(issues.len(), 6, "{issues:#?}");
        assert!(issues.contains(&ModelError::NegativeWorkload {
            subject_id: "anatomy".to_string(),
            hours: -1.0,
        }));
        assert!(issues.contains(&ModelError::InvalidBlockTime {
            block_id: "a1".to_string(),
            source: TimeError::Malformed("eight".to_string()),
        }));
        assert!(issues.contains(&ModelError::DanglingEnrollment {
            class_id: "1-1".to_string(),
            subject_id: "ghost".to_string(),
        }));
        assert!(issues
            .iter()
            .any(|e| matches!(e, ModelError::InvalidBlockTime { block_id, .. } if block_id == "o1")));
        assert!(issues
            .iter()
            .any(|e| matches!(e, ModelError::OverrideKeyMismatch { key, .. } if key == "physiology")));
        assert!(issues
            .iter()
            .any(|e| matches!(e, ModelError::OverrideClassMismatch { found, .. } if found == "2-1")));
    }
}
