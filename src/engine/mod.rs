//! Stateless facade running every stage over a snapshot.
//!
//! A [`ScheduleEngine`] holds only its [`EngineConfig`]. Each report call
//! resolves effective schedules from the snapshot it is given and derives
//! conflicts, clusters, threshold analyses and the grid from those same
//! schedules, so no stage can disagree with another about what overlaps.


use tracing::debug;

use crate::analysis::{self, AcceptanceLedger, ConflictAnalysis, ConflictAnalyzer, ValidationError};
use crate::config::EngineConfig;
use crate::conflicts::{conflict_clusters, Conflict, ConflictCluster, ConflictDetector};
use crate::grid::ScheduleGrid;
use crate::model::{ModelError, ScheduleSnapshot};
use crate::schedule::{collect_class_schedules, collect_selection, AssignmentKey, SkipReport, SubjectSchedule};
use crate::Id;

/// Everything derived for one class (or one builder selection).
#[derive(Debug, Clone)]
pub struct ClassReport<'a> {
    /// The class the report was built for; `None` for a builder selection.
    pub class_id: Option<Id>,
    pub schedules: Vec<SubjectSchedule<'a>>,
    pub conflicts: Vec<Conflict>,
    pub clusters: Vec<ConflictCluster>,
    pub analyses: Vec<ConflictAnalysis>,
    pub grid: ScheduleGrid,
    /// Every block left out by any stage, each counted once.
    pub skipped: SkipReport,
}

impl ClassReport<'_> {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Returns true if saving would currently fail validation.
    pub fn has_blocking_conflicts(&self) -> bool {
        self.analyses.iter().any(ConflictAnalysis::is_blocking)
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Conflict detection, threshold analysis and grid projection over
/// caller-supplied snapshots.
#[derive(Debug, Clone, Default)]
pub struct ScheduleEngine {
    config: EngineConfig,
}

impl ScheduleEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Effective schedules of every subject the class is enrolled in.
    ///
    /// # Errors
    ///
    /// [`ModelError::UnknownClass`] if `class_id` is not in the snapshot.
    pub fn effective_schedules<'a>(
        &self,
        snapshot: &'a ScheduleSnapshot,
        class_id: &str,
    ) -> Result<(Vec<SubjectSchedule<'a>>, SkipReport), ModelError> {
        let class = snapshot.require_class(class_id)?;
        Ok(collect_class_schedules(snapshot, class))
    }

    /// Full report for one class.
    ///
    /// # Errors
    ///
    /// [`ModelError::UnknownClass`] if `class_id` is not in the snapshot.
    pub fn class_report<'a>(
        &self,
        snapshot: &'a ScheduleSnapshot,
        class_id: &str,
        ledger: &AcceptanceLedger,
    ) -> Result<ClassReport<'a>, ModelError> {
        let (schedules, skipped) = self.effective_schedules(snapshot, class_id)?;
        Ok(self.report(Some(class_id.to_string()), schedules, skipped, ledger))
    }

    /// Report for an arbitrary set of assignments, as picked in a schedule
    /// builder. Unknown subjects or classes are skipped, never fatal.
    pub fn builder_report<'a>(
        &self,
        snapshot: &'a ScheduleSnapshot,
        selection: &[AssignmentKey],
        ledger: &AcceptanceLedger,
    ) -> ClassReport<'a> {
        let (schedules, skipped) = collect_selection(snapshot, selection);
        self.report(None, schedules, skipped, ledger)
    }

    /// Checks that `report` may be saved.
    ///
    /// # Errors
    ///
    /// [`ValidationError::UnacceptedConflicts`] naming every over-threshold
    /// pair not yet accepted for all its assignments.
    pub fn validate_save(&self, report: &ClassReport<'_>) -> Result<(), ValidationError> {
        analysis::validate_save(&report.analyses)
    }

    fn report<'a>(
        &self,
        class_id: Option<Id>,
        schedules: Vec<SubjectSchedule<'a>>,
        mut skipped: SkipReport,
        ledger: &AcceptanceLedger,
    ) -> ClassReport<'a> {
        let detection = ConflictDetector::new(self.config.detection_mode).detect(&schedules);
        let analyzed = ConflictAnalyzer::new(self.config.detection_mode).analyze(&schedules, ledger);
        let projection = ScheduleGrid::project(self.config.grid.clone(), &schedules);
        let clusters = conflict_clusters(&detection.conflicts);

        skipped.merge(detection.skipped);
        skipped.merge(analyzed.skipped);
        skipped.merge(projection.skipped);

        debug!(
            class = class_id.as_deref().unwrap_or("<selection>"),
            subjects = schedules.len(),
            conflicts = detection.conflicts.len(),
            clusters = clusters.len(),
            shared_slots = analyzed.analyses.len(),
            skipped = skipped.len(),
            "class report built"
        );

        ClassReport {
            class_id,
            schedules,
            conflicts: detection.conflicts,
            clusters,
            analyses: analyzed.analyses,
            grid: projection.grid,
            skipped,
        }
    }
}
