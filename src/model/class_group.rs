//! Class groups and their per-subject schedule overrides.

use std::collections::{BTreeMap, BTreeSet};

use super::{BlockKind, ModelError, Period, Subject, WeeklyTimeBlock};
use crate::Id;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Class-specific replacement for a subject's default weekly schedule.
///
/// An inactive override is kept around (for instance pre-populated from the
/// defaults while the user edits it) but does not take effect: the class
/// follows the subject's defaults until `is_active` is set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ScheduleOverride {
    pub subject_id: Id,
    pub class_id: Id,
    #[cfg_attr(feature = "serde", serde(default))]
    pub theoretical_blocks: Vec<WeeklyTimeBlock>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub practical_blocks: Vec<WeeklyTimeBlock>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_active: bool,
}

impl ScheduleOverride {
    /// Creates an empty, inactive override.
    pub fn new(subject_id: impl Into<Id>, class_id: impl Into<Id>) -> Self {
        Self {
            subject_id: subject_id.into(),
            class_id: class_id.into(),
            theoretical_blocks: Vec::new(),
            practical_blocks: Vec::new(),
            is_active: false,
        }
    }

    /// Creates an inactive override holding copies of `subject`'s default
    /// blocks, each with a freshly generated id and stamped with `class_id`.
    pub fn seeded_from(subject: &Subject, class_id: impl Into<Id>) -> Self {
        let mut seeded = Self::new(subject.id.clone(), class_id);
        seeded.reseed(subject);
        seeded
    }

    pub fn with_block(mut self, block: WeeklyTimeBlock) -> Self {
        match block.kind {
            BlockKind::Theoretical => self.theoretical_blocks.push(block),
            BlockKind::Practical => self.practical_blocks.push(block),
        }
        self
    }

    pub fn activated(mut self) -> Self {
        self.is_active = true;
        self
    }

    /// Override blocks, theoretical first.
    pub fn blocks(&self) -> impl Iterator<Item = &WeeklyTimeBlock> + '_ {
        self.theoretical_blocks
            .iter()
            .chain(self.practical_blocks.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.theoretical_blocks.is_empty() && self.practical_blocks.is_empty()
    }

    /// Replaces the override blocks with fresh copies of the subject's
    /// current defaults.
    fn reseed(&mut self, subject: &Subject) {
        let class_id = self.class_id.clone();
        let copy = |block: &WeeklyTimeBlock| WeeklyTimeBlock {
            id: crate::generate_id(),
            class_id: Some(class_id.clone()),
            ..block.clone()
        };
        self.theoretical_blocks = subject.default_theoretical_blocks.iter().map(copy).collect();
        self.practical_blocks = subject.default_practical_blocks.iter().map(copy).collect();
    }
}

/// A cohort of students within a period, with its enrolled subjects.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ClassGroup {
    pub id: Id,
    pub name: String,
    pub period: Period,
    #[cfg_attr(feature = "serde", serde(default))]
    pub subject_ids: BTreeSet<Id>,
    /// Overrides keyed by subject id.
    #[cfg_attr(feature = "serde", serde(default))]
    pub schedule_overrides: BTreeMap<Id, ScheduleOverride>,
}

impl ClassGroup {
    pub fn new(id: impl Into<Id>, name: impl Into<String>, period: Period) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            period,
            subject_ids: BTreeSet::new(),
            schedule_overrides: BTreeMap::new(),
        }
    }

    pub fn with_subject(mut self, subject_id: impl Into<Id>) -> Self {
        self.enroll(subject_id);
        self
    }

    /// Enrolls a subject. Returns false if it was already enrolled.
    pub fn enroll(&mut self, subject_id: impl Into<Id>) -> bool {
        self.subject_ids.insert(subject_id.into())
    }

    /// Removes a subject from the class. Its override, if any, is kept so
    /// re-enrolling restores it; use [`clear_override`](Self::clear_override)
    /// to discard it.
    pub fn unenroll(&mut self, subject_id: &str) -> bool {
        self.subject_ids.remove(subject_id)
    }

    pub fn is_enrolled(&self, subject_id: &str) -> bool {
        self.subject_ids.contains(subject_id)
    }

    pub fn override_for(&self, subject_id: &str) -> Option<&ScheduleOverride> {
        self.schedule_overrides.get(subject_id)
    }

    /// Override that currently takes effect for `subject_id`, if any.
    pub fn active_override(&self, subject_id: &str) -> Option<&ScheduleOverride> {
        self.override_for(subject_id).filter(|o| o.is_active)
    }

    /// Stores an override, returning the one it replaces.
    ///
    /// # Errors
    ///
    /// [`ModelError::OverrideClassMismatch`] if the override names another
    /// class.
    pub fn set_override(
        &mut self,
        schedule_override: ScheduleOverride,
    ) -> Result<Option<ScheduleOverride>, ModelError> {
        if schedule_override.class_id != self.id {
            return Err(ModelError::OverrideClassMismatch {
                subject_id: schedule_override.subject_id,
                expected: self.id.clone(),
                found: schedule_override.class_id,
            });
        }
        Ok(self
            .schedule_overrides
            .insert(schedule_override.subject_id.clone(), schedule_override))
    }

    /// Pre-populates an inactive override from the subject's defaults unless
    /// one already exists, and returns it for editing.
    pub fn seed_override(&mut self, subject: &Subject) -> &mut ScheduleOverride {
        let class_id = self.id.clone();
        self.schedule_overrides
            .entry(subject.id.clone())
            .or_insert_with(|| ScheduleOverride::seeded_from(subject, class_id))
    }

    pub fn activate_override(&mut self, subject_id: &str) -> Result<(), ModelError> {
        self.override_mut(subject_id)?.is_active = true;
        Ok(())
    }

    /// Turns the override off. Its blocks are kept.
    pub fn deactivate_override(&mut self, subject_id: &str) -> Result<(), ModelError> {
        self.override_mut(subject_id)?.is_active = false;
        Ok(())
    }

    /// Makes the class follow the subject's defaults again.
    ///
    /// The override record stays; with `reseed` its blocks are replaced by
    /// fresh copies of the subject's current defaults. Returns false when the
    /// class had no override for the subject.
    pub fn restore_defaults(&mut self, subject: &Subject, reseed: bool) -> bool {
        match self.schedule_overrides.get_mut(&subject.id) {
            Some(schedule_override) => {
                schedule_override.is_active = false;
                if reseed {
                    schedule_override.reseed(subject);
                }
                true
            }
            None => false,
        }
    }

    /// Discards the override and its blocks.
    pub fn clear_override(&mut self, subject_id: &str) -> Option<ScheduleOverride> {
        self.schedule_overrides.remove(subject_id)
    }

    fn override_mut(&mut self, subject_id: &str) -> Result<&mut ScheduleOverride, ModelError> {
        let class_id = &self.id;
        self.schedule_overrides
            .get_mut(subject_id)
            .ok_or_else(|| ModelError::MissingOverride {
                class_id: class_id.clone(),
                subject_id: subject_id.to_string(),
            })
    }
}
