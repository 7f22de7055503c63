use crate::model::{ClassGroup, Subject, WeeklyTimeBlock};

/// Resolves the weekly blocks in force for `subject_id` in `class`.
///
/// - An active override wins: its blocks are returned as stored, stamped with
///   the class id.
/// - Otherwise the subject's default blocks are returned, each with a
///   per-class id (`<block id>-<class id>`) and stamped with the class id.
/// - With neither an active override nor a subject, the result is empty.
///
/// The function is pure; callers that render repeatedly may memoize it.
///
/// # Examples
///
/// ```
/// use classgrid::model::{BlockKind, ClassGroup, Period, Subject, WeeklyTimeBlock};
/// use classgrid::schedule::resolve_effective_schedule;
/// use classgrid::time::DayOfWeek;
///
/// let subject = Subject::new("z", "Zoology", Period::Term(2), 60.0).with_block(
///     WeeklyTimeBlock::new("z1", "z", BlockKind::Theoretical, DayOfWeek::Monday, "08:00", "10:00"),
/// );
/// let class = ClassGroup::new("2-1", "Class 2-1", Period::Term(2)).with_subject("z");
///
/// let blocks = resolve_effective_schedule(&class, "z", Some(&subject));
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].id, "z1-2-1");
/// assert_eq!(blocks[0].class_id.as_deref(), Some("2-1"));
/// ```
pub fn resolve_effective_schedule(
    class: &ClassGroup,
    subject_id: &str,
    subject_default: Option<&Subject>,
) -> Vec<WeeklyTimeBlock> {
    if let Some(schedule_override) = class.active_override(subject_id) {
        return schedule_override
            .blocks()
            .map(|block| block.stamped(&class.id))
            .collect();
    }

    match subject_default {
        Some(subject) => subject
            .default_blocks()
            .map(|block| block.scoped_to_class(&class.id))
            .collect(),
        None => Vec::new(),
    }
}
