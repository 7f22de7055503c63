use std::collections::BTreeSet;

use crate::schedule::AssignmentKey;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Explicit user acceptances of over-threshold conflicts.
///
/// Scoped to a single (subject, class) assignment: accepting subject X in
/// class A says nothing about X in class B.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AcceptanceLedger {
    accepted: BTreeSet<AssignmentKey>,
}

impl AcceptanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the assignment's conflicts as accepted. Returns false if it
    /// already was.
    pub fn accept(&mut self, assignment: AssignmentKey) -> bool {
        self.accepted.insert(assignment)
    }

    /// Withdraws an acceptance. Returns false if there was none.
    pub fn revoke(&mut self, assignment: &AssignmentKey) -> bool {
        self.accepted.remove(assignment)
    }

    pub fn is_accepted(&self, assignment: &AssignmentKey) -> bool {
        self.accepted.contains(assignment)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssignmentKey> + '_ {
        self.accepted.iter()
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    pub fn clear(&mut self) {
        self.accepted.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acceptance_is_scoped_to_the_class() {
        let mut ledger = AcceptanceLedger::new();
        let in_a = AssignmentKey::for_class("x", "A");
        let in_b = AssignmentKey::for_class("x", "B");

        assert!(ledger.accept(in_a.clone()));
        assert!(ledger.is_accepted(&in_a));
        assert!(!ledger.is_accepted(&in_b));
    }

    #[test]
    fn accept_and_revoke_are_idempotent() {
        let mut ledger = AcceptanceLedger::new();
        let key = AssignmentKey::for_class("x", "A");
        assert!(ledger.accept(key.clone()));
        assert!(!ledger.accept(key.clone()));
        assert_eq!(ledger.len(), 1);
        assert!(ledger.revoke(&key));
        assert!(!ledger.revoke(&key));
        assert!(ledger.is_empty());
    }
}
