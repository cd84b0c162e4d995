//! Hall of fame

use serde::{Deserialize, Serialize};

use crate::population::individual::Individual;

/// The best individuals ever seen across a run
///
/// Members are stored best-first. Updates snapshot candidates by cloning,
/// so later variation of the population never touches the hall. Ties are
/// stable: an incumbent is only displaced by a strictly better candidate,
/// and duplicate trees are never admitted twice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HallOfFame {
    capacity: usize,
    members: Vec<Individual>,
}

impl HallOfFame {
    /// Create a hall with room for `capacity` members
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "hall of fame capacity must be at least 1");
        Self {
            capacity,
            members: Vec::with_capacity(capacity),
        }
    }

    /// Room for members
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current member count
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the hall is empty
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members, best first
    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.members.iter()
    }

    /// The best member ever seen
    pub fn best(&self) -> Option<&Individual> {
        self.members.first()
    }

    /// Offer every individual of a population to the hall
    ///
    /// Unevaluated individuals are ignored. A candidate enters only if the
    /// hall has room or the candidate strictly beats the current worst
    /// member; its clone is inserted at rank, keeping best-first order.
    pub fn update(&mut self, candidates: &[Individual]) {
        for candidate in candidates {
            if !candidate.is_evaluated() {
                continue;
            }
            if self.members.iter().any(|m| m.tree == candidate.tree) {
                continue;
            }
            if self.members.len() >= self.capacity {
                let worst = &self.members[self.members.len() - 1];
                if !candidate.is_better_than(worst) {
                    continue;
                }
                self.members.pop();
            }
            let rank = self
                .members
                .iter()
                .position(|m| candidate.is_better_than(m))
                .unwrap_or(self.members.len());
            self.members.insert(rank, candidate.clone());
        }
    }
}

impl<'a> IntoIterator for &'a HallOfFame {
    type Item = &'a Individual;
    type IntoIter = std::slice::Iter<'a, Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::{Direction, Fitness};
    use crate::tree::prefix::{Node, PrimitiveTree};

    fn individual(error: f64) -> Individual {
        let mut ind = Individual::new(PrimitiveTree::leaf(Node::Constant(error)).unwrap());
        ind.fitness = Some(Fitness::new(vec![error], &[Direction::Minimize]));
        ind
    }

    #[test]
    fn test_fills_best_first() {
        let mut hof = HallOfFame::new(3);
        hof.update(&[individual(5.0), individual(1.0), individual(3.0)]);

        let errors: Vec<f64> = hof
            .iter()
            .map(|m| m.fitness.as_ref().unwrap().first())
            .collect();
        assert_eq!(errors, vec![1.0, 3.0, 5.0]);
        assert_eq!(hof.best().unwrap().fitness.as_ref().unwrap().first(), 1.0);
    }

    #[test]
    fn test_capacity_evicts_worst() {
        let mut hof = HallOfFame::new(2);
        hof.update(&[individual(5.0), individual(3.0)]);
        hof.update(&[individual(4.0)]);

        let errors: Vec<f64> = hof
            .iter()
            .map(|m| m.fitness.as_ref().unwrap().first())
            .collect();
        assert_eq!(errors, vec![3.0, 4.0]);
    }

    #[test]
    fn test_worse_candidate_rejected_when_full() {
        let mut hof = HallOfFame::new(1);
        hof.update(&[individual(2.0)]);
        hof.update(&[individual(7.0)]);

        assert_eq!(hof.len(), 1);
        assert_eq!(hof.best().unwrap().fitness.as_ref().unwrap().first(), 2.0);
    }

    #[test]
    fn test_ties_keep_first_seen() {
        let mut first = individual(2.0);
        first.tree = PrimitiveTree::leaf(Node::Argument(0)).unwrap();
        let second = individual(2.0);

        let mut hof = HallOfFame::new(1);
        hof.update(&[first.clone()]);
        hof.update(&[second]);

        assert_eq!(hof.len(), 1);
        assert_eq!(hof.best().unwrap().tree, first.tree);
    }

    #[test]
    fn test_duplicate_tree_not_admitted_twice() {
        let mut hof = HallOfFame::new(3);
        hof.update(&[individual(2.0)]);
        hof.update(&[individual(2.0)]);

        assert_eq!(hof.len(), 1);
    }

    #[test]
    fn test_unevaluated_ignored() {
        let mut hof = HallOfFame::new(2);
        hof.update(&[Individual::new(
            PrimitiveTree::leaf(Node::Constant(0.0)).unwrap(),
        )]);

        assert!(hof.is_empty());
    }

    #[test]
    fn test_members_are_snapshots() {
        let mut hof = HallOfFame::new(1);
        let mut candidate = individual(1.0);
        hof.update(&[candidate.clone()]);

        candidate.tree = PrimitiveTree::leaf(Node::Argument(0)).unwrap();
        candidate.invalidate();
        assert!(hof.best().unwrap().is_evaluated());
        assert_ne!(hof.best().unwrap().tree, candidate.tree);
    }
}
