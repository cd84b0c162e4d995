//! Subtree mutation

use rand::Rng;

use crate::error::GenerateError;
use crate::operators::traits::MutationOperator;
use crate::primitives::set::PrimitiveSet;
use crate::tree::generate::{generate, Strategy};
use crate::tree::prefix::PrimitiveTree;

/// Uniform subtree replacement
///
/// Picks one node uniformly and replaces the subtree rooted there with a
/// freshly generated one. The replacement uses the same generation
/// machinery as initialization, so ephemeral constants are redrawn.
#[derive(Clone, Copy, Debug)]
pub struct UniformMutation {
    strategy: Strategy,
    min_depth: usize,
    max_depth: usize,
}

impl UniformMutation {
    /// Create a mutation with the given replacement-subtree generator
    pub fn new(strategy: Strategy, min_depth: usize, max_depth: usize) -> Self {
        assert!(min_depth <= max_depth, "min_depth must not exceed max_depth");
        Self {
            strategy,
            min_depth,
            max_depth,
        }
    }
}

impl Default for UniformMutation {
    /// Full-grown replacement subtrees of depth 0 to 2
    fn default() -> Self {
        Self::new(Strategy::Full, 0, 2)
    }
}

impl MutationOperator for UniformMutation {
    fn mutate<R: Rng>(
        &self,
        tree: &PrimitiveTree,
        pset: &PrimitiveSet,
        rng: &mut R,
    ) -> Result<PrimitiveTree, GenerateError> {
        let range = tree.subtree(rng.gen_range(0..tree.size()));
        let replacement = generate(pset, self.strategy, self.min_depth, self.max_depth, rng)?;

        let mut mutant = tree.clone();
        mutant.splice(range, replacement.nodes());
        Ok(mutant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::builtins;
    use crate::tree::prefix::Node;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mutants_are_well_formed() {
        let pset = builtins::arithmetic(["x"]).unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        let op = UniformMutation::default();

        for _ in 0..100 {
            let tree = generate(&pset, Strategy::HalfAndHalf, 1, 4, &mut rng).unwrap();
            let mutant = op.mutate(&tree, &pset, &mut rng).unwrap();
            assert!(PrimitiveTree::from_nodes(mutant.nodes().to_vec()).is_ok());
        }
    }

    #[test]
    fn test_input_untouched() {
        let pset = builtins::arithmetic(["x"]).unwrap();
        let mut rng = StdRng::seed_from_u64(22);
        let op = UniformMutation::default();

        let tree = generate(&pset, Strategy::Full, 3, 3, &mut rng).unwrap();
        let before = tree.clone();
        op.mutate(&tree, &pset, &mut rng).unwrap();
        assert_eq!(tree, before);
    }

    #[test]
    fn test_single_leaf_is_fully_replaced() {
        let pset = builtins::arithmetic(["x"]).unwrap();
        let mut rng = StdRng::seed_from_u64(23);
        let op = UniformMutation::new(Strategy::Full, 2, 2);

        let tree = generate(&pset, Strategy::Grow, 0, 0, &mut rng).unwrap();
        let mutant = op.mutate(&tree, &pset, &mut rng).unwrap();
        assert_eq!(mutant.height(), 2);
    }

    #[test]
    fn test_empty_vocabulary_propagates_error() {
        let pset = PrimitiveSet::with_arguments(["x"]).unwrap();
        let mut rng = StdRng::seed_from_u64(24);
        // Full strategy with depth >= 1 needs at least one function.
        let op = UniformMutation::new(Strategy::Full, 2, 2);

        let tree = PrimitiveTree::leaf(Node::Argument(0)).unwrap();
        assert!(op.mutate(&tree, &pset, &mut rng).is_err());
    }
}
