//! Subtree crossover

use rand::Rng;

use crate::operators::traits::CrossoverOperator;
use crate::tree::prefix::PrimitiveTree;

/// One-point subtree exchange
///
/// Picks one node uniformly in each parent and swaps the subtrees rooted
/// there. Any node may be picked, including a root or a leaf, so one child
/// can absorb the other parent entirely.
#[derive(Clone, Copy, Debug, Default)]
pub struct SubtreeCrossover;

impl SubtreeCrossover {
    /// Create a subtree crossover operator
    pub fn new() -> Self {
        Self
    }
}

impl CrossoverOperator for SubtreeCrossover {
    fn crossover<R: Rng>(
        &self,
        first: &PrimitiveTree,
        second: &PrimitiveTree,
        rng: &mut R,
    ) -> (PrimitiveTree, PrimitiveTree) {
        let first_range = first.subtree(rng.gen_range(0..first.size()));
        let second_range = second.subtree(rng.gen_range(0..second.size()));

        let mut child_a = first.clone();
        child_a.splice(first_range.clone(), &second.nodes()[second_range.clone()]);
        let mut child_b = second.clone();
        child_b.splice(second_range, &first.nodes()[first_range]);

        (child_a, child_b)
    }
}
