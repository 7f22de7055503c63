//! Example building a weekly conflict report for one class.
//!
//! Run with: `cargo run --example weekly_report`

use classgrid::grid::CellState;
use classgrid::model::{BlockKind, Period};
use classgrid::schedule::AssignmentKey;
use classgrid::time::DayOfWeek;
use classgrid::{
    AcceptanceLedger, ClassGroup, ScheduleEngine, ScheduleOverride, ScheduleSnapshot, Subject,
    WeeklyTimeBlock,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn block(id: &str, subject: &str, kind: BlockKind, day: DayOfWeek, start: &str, end: &str) -> WeeklyTimeBlock {
    WeeklyTimeBlock::new(id, subject, kind, day, start, end)
        .with_location("Room 101")
        .with_workload_hours(2.0)
}

fn main() {
    // RUST_LOG=classgrid=debug shows per-stage summaries and skipped blocks.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_target(false))
        .init();

    println!("=== Weekly Class Report Example ===\n");

    let anatomy = Subject::new("anatomy", "Anatomy", Period::Term(1), 120.0)
        .with_instructor("Dr. Silva")
        .with_block(block("an-t", "anatomy", BlockKind::Theoretical, DayOfWeek::Monday, "08:00", "10:00"))
        .with_block(block("an-p", "anatomy", BlockKind::Practical, DayOfWeek::Wednesday, "14:00", "16:00"));
    let physiology = Subject::new("physiology", "Physiology", Period::Term(1), 100.0)
        .with_block(block("ph-t", "physiology", BlockKind::Theoretical, DayOfWeek::Monday, "09:00", "11:00"));
    let ethics = Subject::new("ethics", "Ethics", Period::Special, 6.0)
        .with_block(block("et-t", "ethics", BlockKind::Theoretical, DayOfWeek::Wednesday, "14:00", "16:00"));

    let mut class = ClassGroup::new("1-1", "Class 1-1", Period::Term(1))
        .with_subject("anatomy")
        .with_subject("physiology")
        .with_subject("ethics");

    let snapshot = ScheduleSnapshot::default()
        .with_subject(anatomy.clone())
        .with_subject(physiology)
        .with_subject(ethics)
        .with_class(class.clone());

    for issue in snapshot.validate() {
        println!("Data issue: {}", issue);
    }

    let engine = ScheduleEngine::default();
    let mut ledger = AcceptanceLedger::new();
    let report = engine.class_report(&snapshot, "1-1", &ledger).unwrap();

    println!("--- Conflicts ({}) ---", report.conflicts.len());
    for conflict in &report.conflicts {
        println!("  {}", conflict);
    }

    println!("\n--- Threshold Analysis ---");
    for analysis in &report.analyses {
        println!(
            "  {}: {:.1}% (within threshold: {})",
            analysis.slot,
            analysis.overlap_percentage * 100.0,
            analysis.is_within_threshold
        );
    }

    println!("\n--- Monday Grid ---");
    let grid = &report.grid;
    for slot in grid.layout().slots().iter().take(10) {
        let cell = match grid.cell_state(DayOfWeek::Monday, *slot) {
            CellState::Free => "-".to_string(),
            CellState::Occupied(entry) => entry.label(),
            CellState::Conflicted { count } => format!("!! {} blocks", count),
        };
        println!("  {} {}", slot, cell);
    }

    println!("\n--- Saving ---");
    match engine.validate_save(&report) {
        Ok(()) => println!("Schedule can be saved"),
        Err(e) => println!("Save rejected: {}", e),
    }

    ledger.accept(AssignmentKey::for_class("anatomy", "1-1"));
    ledger.accept(AssignmentKey::for_class("ethics", "1-1"));
    let report = engine.class_report(&snapshot, "1-1", &ledger).unwrap();
    match engine.validate_save(&report) {
        Ok(()) => println!("After accepting: schedule can be saved"),
        Err(e) => println!("After accepting: still rejected: {}", e),
    }

    println!("\n--- Moving Physiology for this class ---");
    class
        .set_override(
            ScheduleOverride::new("physiology", "1-1")
                .with_block(block("ph-o", "physiology", BlockKind::Theoretical, DayOfWeek::Friday, "08:00", "10:00"))
                .activated(),
        )
        .unwrap();
    let snapshot = ScheduleSnapshot::default()
        .with_subject(anatomy)
        .with_subject(snapshot.subjects[1].clone())
        .with_subject(snapshot.subjects[2].clone())
        .with_class(class);
    let report = engine.class_report(&snapshot, "1-1", &ledger).unwrap();
    println!("Conflicts after override: {}", report.conflicts.len());
    println!("Skipped blocks: {}", report.skipped_count());
}
