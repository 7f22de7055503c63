//! Engine configuration.

use crate::conflicts::DetectionMode;
use crate::grid::GridLayout;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a [`ScheduleEngine`](crate::ScheduleEngine).
///
/// The conflict threshold is a fixed policy constant
/// ([`CONFLICT_THRESHOLD`](crate::CONFLICT_THRESHOLD)) and is not configurable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct EngineConfig {
    /// Which subject pairs conflict detection compares.
    pub detection_mode: DetectionMode,
    /// Day columns and time-slot rows of projected grids.
    pub grid: GridLayout,
}

impl EngineConfig {
    pub fn with_detection_mode(mut self, mode: DetectionMode) -> Self {
        self.detection_mode = mode;
        self
    }

    pub fn with_grid(mut self, grid: GridLayout) -> Self {
        self.grid = grid;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{ClockTime, DayOfWeek};

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.detection_mode, DetectionMode::AllPairsWithinClass);
        assert_eq!(config.grid, GridLayout::default());
    }

    #[test]
    fn builders_replace_fields() {
        let grid = GridLayout::from_slots([DayOfWeek::Monday], Vec::<ClockTime>::new());
        let config = EngineConfig::default()
            .with_detection_mode(DetectionMode::CrossPeriodOnly)
            .with_grid(grid.clone());
        assert_eq!(config.detection_mode, DetectionMode::CrossPeriodOnly);
        assert_eq!(config.grid, grid);
    }
}
