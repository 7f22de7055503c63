//! Test suite for grid layout and projection.

use super::*;
use crate::conflicts::{ConflictDetector, DetectionMode};
use crate::model::{BlockKind, ClassGroup, Period, Subject, WeeklyTimeBlock};
use crate::schedule::SubjectSchedule;
use crate::time::{ClockTime, DayOfWeek, TimeError};

fn at(value: &str) -> ClockTime {
    value.parse().unwrap()
}

fn subject(id: &str, name: &str, day: DayOfWeek, start: &str, end: &str) -> Subject {
    Subject::new(id, name, Period::Term(1), 60.0).with_block(
        WeeklyTimeBlock::new(format!("{id}-t"), id, BlockKind::Theoretical, day, start, end)
            .with_location("Room 4"),
    )
}

#[cfg(test)]
mod layout {
    use super::*;

    #[test]
    fn default_covers_six_days_half_hourly() {
        let layout = GridLayout::default();
        assert_eq!(layout.days(), DayOfWeek::ALL);
        assert_eq!(layout.slots()[0], at("07:00"));
        assert_eq!(layout.slots()[1], at("07:30"));
        assert_eq!(*layout.slots().last().unwrap(), at("22:00"));
        assert_eq!(layout.cell_count(), 6 * 31);
    }

    #[test]
    fn new_matches_default() {
        let layout = GridLayout::new(DayOfWeek::ALL, at("07:00"), at("22:00"), 30).unwrap();
        assert_eq!(layout, GridLayout::default());
    }

    #[test]
    fn uneven_step_stops_before_last() {
        let layout = GridLayout::new([DayOfWeek::Monday], at("08:00"), at("09:00"), 25).unwrap();
        assert_eq!(layout.slots(), [at("08:00"), at("08:25"), at("08:50")]);
    }

    #[test]
    fn rejects_zero_step_and_reversed_bounds() {
        assert_eq!(
            GridLayout::new(DayOfWeek::ALL, at("08:00"), at("09:00"), 0),
            Err(TimeError::ZeroStep)
        );
        assert!(matches!(
            GridLayout::new(DayOfWeek::ALL, at("10:00"), at("09:00"), 30),
            Err(TimeError::EmptyInterval { .. })
        ));
    }

    #[test]
    fn from_slots_sorts_markers() {
        let layout = GridLayout::from_slots([DayOfWeek::Friday], [at("10:00"), at("08:00"), at("10:00")]);
        assert_eq!(layout.slots(), [at("08:00"), at("10:00")]);
        assert_eq!(layout.slot_index(at("10:00")), Some(1));
        assert_eq!(layout.slot_index(at("09:00")), None);
    }
}

#[cfg(test)]
mod projection {
    use super::*;

    #[test]
    fn block_occupies_half_open_range() {
        let anatomy = subject("a", "Anatomy", DayOfWeek::Monday, "08:00", "10:00");
        let schedules = [SubjectSchedule::unscoped(&anatomy)];
        let Projection { grid, skipped } = ScheduleGrid::project(GridLayout::default(), &schedules);

        assert!(skipped.is_empty());
        assert_eq!(grid.cell_state(DayOfWeek::Monday, at("07:30")), CellState::Free);
        assert_eq!(grid.occupants(DayOfWeek::Monday, at("08:00")).len(), 1);
        assert_eq!(grid.occupants(DayOfWeek::Monday, at("09:30")).len(), 1);
        assert_eq!(grid.cell_state(DayOfWeek::Monday, at("10:00")), CellState::Free);
        assert_eq!(grid.cell_state(DayOfWeek::Tuesday, at("08:00")), CellState::Free);
        assert_eq!(grid.occupied_count(), 4);
    }

    #[test]
    fn occupied_cell_carries_label() {
        let anatomy = subject("a", "Anatomy", DayOfWeek::Monday, "08:00", "10:00");
        let class = ClassGroup::new("1-1", "1-1", Period::Term(1)).with_subject("a");
        let schedules = [SubjectSchedule::for_class(&class, &anatomy)];
        let grid = ScheduleGrid::project(GridLayout::default(), &schedules).grid;

        match grid.cell_state(DayOfWeek::Monday, at("08:30")) {
            CellState::Occupied(entry) => {
                assert_eq!(entry.label(), "Anatomy (theoretical) 08:00-10:00");
                assert_eq!(entry.block_id, "a-t-1-1");
                assert_eq!(entry.class_id.as_deref(), Some("1-1"));
                assert_eq!(entry.location, "Room 4");
            }
            other => panic!("expected an occupied cell, got {other:?}"),
        }
    }

    #[test]
    fn shared_slots_are_conflicted() {
        let anatomy = subject("a", "Anatomy", DayOfWeek::Monday, "08:00", "10:00");
        let physiology = subject("p", "Physiology", DayOfWeek::Monday, "09:00", "11:00");
        let schedules = [SubjectSchedule::unscoped(&anatomy), SubjectSchedule::unscoped(&physiology)];
        let grid = ScheduleGrid::project(GridLayout::default(), &schedules).grid;

        assert_eq!(
            grid.cell_state(DayOfWeek::Monday, at("09:00")),
            CellState::Conflicted { count: 2 }
        );
        assert_eq!(
            grid.conflicted_cells(),
            [(DayOfWeek::Monday, at("09:00")), (DayOfWeek::Monday, at("09:30"))]
        );
        assert_eq!(grid.occupied_count(), 6);
    }

    #[test]
    fn touching_blocks_never_share_a_cell() {
        let anatomy = subject("a", "Anatomy", DayOfWeek::Monday, "09:00", "10:00");
        let physiology = subject("p", "Physiology", DayOfWeek::Monday, "10:00", "11:00");
        let schedules = [SubjectSchedule::unscoped(&anatomy), SubjectSchedule::unscoped(&physiology)];
        let grid = ScheduleGrid::project(GridLayout::default(), &schedules).grid;
        assert!(grid.conflicted_cells().is_empty());
    }

    #[test]
    fn malformed_blocks_are_skipped_and_counted() {
        let broken = subject("b", "Broken", DayOfWeek::Monday, "25:00", "26:00");
        let anatomy = subject("a", "Anatomy", DayOfWeek::Monday, "08:00", "09:00");
        let schedules = [SubjectSchedule::unscoped(&broken), SubjectSchedule::unscoped(&anatomy)];
        let Projection { grid, skipped } = ScheduleGrid::project(GridLayout::default(), &schedules);

        assert_eq!(skipped.malformed_time_count(), 1);
        assert_eq!(grid.occupied_count(), 2);
    }

    #[test]
    fn days_outside_layout_are_ignored() {
        let saturday = subject("s", "Seminar", DayOfWeek::Saturday, "08:00", "09:00");
        let layout = GridLayout::new([DayOfWeek::Monday], at("08:00"), at("09:00"), 30).unwrap();
        let grid = ScheduleGrid::project(layout, &[SubjectSchedule::unscoped(&saturday)]).grid;
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn grid_and_detector_agree_on_overlaps() {
        let anatomy = subject("a", "Anatomy", DayOfWeek::Wednesday, "08:00", "10:30");
        let physiology = subject("p", "Physiology", DayOfWeek::Wednesday, "10:00", "12:00");
        let chemistry = subject("c", "Chemistry", DayOfWeek::Wednesday, "12:00", "13:00");
        let schedules = [
            SubjectSchedule::unscoped(&anatomy),
            SubjectSchedule::unscoped(&physiology),
            SubjectSchedule::unscoped(&chemistry),
        ];

        let grid = ScheduleGrid::project(GridLayout::default(), &schedules).grid;
        let detection = ConflictDetector::new(DetectionMode::AllPairsWithinClass).detect(&schedules);

        assert_eq!(detection.conflicts.len(), 1);
        let window = detection.conflicts[0].window;
        for (day, slot) in grid.conflicted_cells() {
            assert!(window.contains(day, slot));
        }
        assert_eq!(grid.conflicted_cells(), [(DayOfWeek::Wednesday, at("10:00"))]);
    }
}

#[cfg(feature = "serde")]
mod serde_tests {
    use super::*;

    #[test]
    fn deserialized_slots_are_sorted_and_deduplicated() {
        let json = r#"{"days": ["tuesday"], "slots": ["10:00", "08:00", "09:00", "08:00"]}"#;
        let layout: GridLayout = serde_json::from_str(json).unwrap();

        assert_eq!(layout.slots(), [at("08:00"), at("09:00"), at("10:00")]);
        assert_eq!(layout.slot_index(at("10:00")), Some(2));
        assert_eq!(layout.slot_index(at("08:00")), Some(0));
    }

    #[test]
    fn layout_round_trips_through_json() {
        let layout = GridLayout::default();
        let json = serde_json::to_string(&layout).unwrap();
        let restored: GridLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, layout);
    }
}
