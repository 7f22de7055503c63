//! Projection of effective blocks onto a [`GridLayout`].

use tracing::debug;

use super::GridLayout;
use crate::model::BlockKind;
use crate::schedule::{SkipReport, SubjectSchedule};
use crate::time::{ClockTime, DayOfWeek, WeeklyInterval};
use crate::Id;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One block as shown in a grid cell.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GridEntry {
    pub block_id: Id,
    pub subject_id: Id,
    pub subject_name: String,
    pub class_id: Option<Id>,
    pub kind: BlockKind,
    pub interval: WeeklyInterval,
    pub location: String,
}

impl GridEntry {
    /// Cell caption: subject name, kind and time range.
    pub fn label(&self) -> String {
        format!(
            "{} ({}) {}-{}",
            self.subject_name,
            self.kind,
            self.interval.start(),
            self.interval.end()
        )
    }
}

/// Display state of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellState<'g> {
    Free,
    Occupied(&'g GridEntry),
    /// Two or more blocks share the slot; only the count is rendered.
    Conflicted { count: usize },
}

/// Day × slot lookup of the blocks occupying each cell.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleGrid {
    layout: GridLayout,
    /// `cells[day][slot]`, indexed like the layout.
    cells: Vec<Vec<Vec<GridEntry>>>,
}

/// Output of one projection.
#[derive(Debug, Clone)]
pub struct Projection {
    pub grid: ScheduleGrid,
    /// Blocks left out because their times did not parse.
    pub skipped: SkipReport,
}

impl ScheduleGrid {
    /// Places every parseable block of `schedules` in each slot `t` of its
    /// day with `start <= t < end`.
    pub fn project(layout: GridLayout, schedules: &[SubjectSchedule<'_>]) -> Projection {
        let mut skipped = SkipReport::new();
        let mut cells = vec![vec![Vec::new(); layout.slots().len()]; layout.days().len()];
        let mut placed = 0usize;

        for schedule in schedules {
            for timed in schedule.timed_blocks(&mut skipped) {
                let Some(day) = layout.day_index(timed.interval.day()) else {
                    continue;
                };
                let entry = GridEntry {
                    block_id: timed.block.id.clone(),
                    subject_id: schedule.subject.id.clone(),
                    subject_name: schedule.subject.name.clone(),
                    class_id: schedule.class_id.clone(),
                    kind: timed.block.kind,
                    interval: timed.interval,
                    location: timed.block.location.clone(),
                };
                for (slot, marker) in layout.slots().iter().enumerate() {
                    if timed.interval.contains(timed.interval.day(), *marker) {
                        cells[day][slot].push(entry.clone());
                        placed += 1;
                    }
                }
            }
        }

        debug!(
            days = layout.days().len(),
            slots = layout.slots().len(),
            placements = placed,
            skipped = skipped.len(),
            "schedule grid projected"
        );

        Projection {
            grid: ScheduleGrid { layout, cells },
            skipped,
        }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Blocks occupying `(day, slot)`. Empty for markers outside the layout.
    pub fn occupants(&self, day: DayOfWeek, slot: ClockTime) -> &[GridEntry] {
        match (self.layout.day_index(day), self.layout.slot_index(slot)) {
            (Some(d), Some(s)) => &self.cells[d][s],
            _ => &[],
        }
    }

    pub fn cell_state(&self, day: DayOfWeek, slot: ClockTime) -> CellState<'_> {
        match self.occupants(day, slot) {
            [] => CellState::Free,
            [only] => CellState::Occupied(only),
            many => CellState::Conflicted { count: many.len() },
        }
    }

    /// Every cell with two or more occupants, in day then slot order.
    pub fn conflicted_cells(&self) -> Vec<(DayOfWeek, ClockTime)> {
        self.iter_cells()
            .filter(|(_, _, entries)| entries.len() >= 2)
            .map(|(day, slot, _)| (day, slot))
            .collect()
    }

    /// Number of cells with at least one occupant.
    pub fn occupied_count(&self) -> usize {
        self.iter_cells()
            .filter(|(_, _, entries)| !entries.is_empty())
            .count()
    }

    fn iter_cells(&self) -> impl Iterator<Item = (DayOfWeek, ClockTime, &[GridEntry])> + '_ {
        self.layout.days().iter().enumerate().flat_map(move |(d, day)| {
            self.layout
                .slots()
                .iter()
                .enumerate()
                .map(move |(s, slot)| (*day, *slot, self.cells[d][s].as_slice()))
        })
    }
}
