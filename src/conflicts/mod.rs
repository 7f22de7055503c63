//! Pairwise time-conflict detection between subjects.
//!
//! A conflict is one pair of blocks, belonging to two different subjects,
//! whose half-open intervals share at least one minute on the same day.
//! Two blocks of the same subject are never reported against each other: a
//! subject's theoretical and practical sessions may run concurrently for
//! different student subgroups. That exclusion is a policy decision kept on
//! purpose and applies in every [`DetectionMode`].
//!
//! # Module Structure
//!
//! - [`mode`] - which subject pairs are compared
//! - [`conflict`] - conflict records and their order-independent identity
//! - [`detector`] - the pairwise scan
//! - [`cluster`] - connected groups of mutually conflicting assignments

mod cluster;
mod conflict;
mod detector;
mod mode;


pub use cluster::{conflict_clusters, ConflictCluster};
pub use conflict::{Conflict, ConflictKey, ConflictSide};
pub use detector::{ConflictDetector, Detection};
pub use mode::DetectionMode;
