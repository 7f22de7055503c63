//! Groups of assignments linked by conflicts.
//!
//! Nodes of the conflict graph are subject assignments and every conflict is
//! an undirected edge. Each connected component is one cluster: a set of
//! assignments that cannot all be rescheduled independently. Clusters with
//! three or more members are the multi-way collisions a pairwise list makes
//! hard to see.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{NodeIndex, UnGraph};
use qtty::{Minute, Quantity};

use super::{Conflict, ConflictKey};
use crate::schedule::AssignmentKey;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A connected group of conflicting assignments.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ConflictCluster {
    /// Member assignments, sorted.
    pub assignments: Vec<AssignmentKey>,
    /// Conflicts between members, in detection order.
    pub conflicts: Vec<ConflictKey>,
    /// Sum of the overlap of every member conflict.
    pub total_overlap: Quantity<Minute>,
}

impl ConflictCluster {
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Three or more assignments tangled together.
    pub fn is_multiway(&self) -> bool {
        self.assignments.len() >= 3
    }

    pub fn involves_subject(&self, subject_id: &str) -> bool {
        self.assignments.iter().any(|a| a.subject_id == subject_id)
    }
}

/// Splits `conflicts` into connected clusters, largest first.
pub fn conflict_clusters(conflicts: &[Conflict]) -> Vec<ConflictCluster> {
    let mut graph: UnGraph<AssignmentKey, usize> = UnGraph::new_undirected();
    let mut node_by_key: BTreeMap<AssignmentKey, NodeIndex> = BTreeMap::new();

    for (idx, conflict) in conflicts.iter().enumerate() {
        let a = node_for(&mut graph, &mut node_by_key, conflict.first.assignment_key());
        let b = node_for(&mut graph, &mut node_by_key, conflict.second.assignment_key());
        graph.add_edge(a, b, idx);
    }

    let mut clusters: Vec<ConflictCluster> = tarjan_scc(&graph)
        .into_iter()
        .map(|component| {
            let members: BTreeSet<AssignmentKey> =
                component.iter().map(|&node| graph[node].clone()).collect();
            let inside: Vec<&Conflict> = conflicts
                .iter()
                .filter(|c| members.contains(&c.first.assignment_key()))
                .collect();
            ConflictCluster {
                conflicts: inside.iter().map(|c| c.key()).collect(),
                total_overlap: inside
                    .iter()
                    .map(|c| c.overlap)
                    .fold(Quantity::new(0.0), |acc, m| acc + m),
                assignments: members.into_iter().collect(),
            }
        })
        .collect();

    clusters.sort_by(|a, b| {
        b.len()
            .cmp(&a.len())
            .then_with(|| a.assignments.cmp(&b.assignments))
    });
    clusters
}

fn node_for(
    graph: &mut UnGraph<AssignmentKey, usize>,
    node_by_key: &mut BTreeMap<AssignmentKey, NodeIndex>,
    key: AssignmentKey,
) -> NodeIndex {
    *node_by_key
        .entry(key)
        .or_insert_with_key(|key| graph.add_node(key.clone()))
}
