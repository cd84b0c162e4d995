//! Individuals

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::fitness::Fitness;
use crate::tree::prefix::PrimitiveTree;

/// A candidate program paired with its fitness, if evaluated
///
/// Fitness is `None` until evaluated and goes back to `None` whenever the
/// tree changes, so stale scores can never leak into selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    /// The candidate's expression tree
    pub tree: PrimitiveTree,
    /// Evaluated fitness, or `None` while pending
    pub fitness: Option<Fitness>,
}

impl Individual {
    /// Create an unevaluated individual
    pub fn new(tree: PrimitiveTree) -> Self {
        Self {
            tree,
            fitness: None,
        }
    }

    /// Whether a fitness value is present
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Drop the fitness value after the tree was varied
    pub fn invalidate(&mut self) {
        self.fitness = None;
    }

    /// Compare by fitness; any evaluated fitness beats a pending one
    pub fn is_better_than(&self, other: &Self) -> bool {
        match (&self.fitness, &other.fitness) {
            (Some(a), Some(b)) => a.is_better_than(b),
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}

impl PartialOrd for Individual {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_better_than(other) {
            Some(Ordering::Greater)
        } else if other.is_better_than(self) {
            Some(Ordering::Less)
        } else {
            Some(Ordering::Equal)
        }
    }
}
