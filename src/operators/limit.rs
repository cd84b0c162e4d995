//! Height-limit decorator
//!
//! Bloat control: wraps a variation operator and discards any output that
//! grows past a height ceiling, keeping the corresponding input instead.

use rand::Rng;

use crate::error::GenerateError;
use crate::operators::traits::{CrossoverOperator, MutationOperator};
use crate::primitives::set::PrimitiveSet;
use crate::tree::prefix::PrimitiveTree;

/// Koza's customary ceiling of 17 edges
pub const DEFAULT_MAX_HEIGHT: usize = 17;

/// Variation operator wrapper enforcing a maximum tree height
///
/// For crossover, each child is checked against its own parent slot: an
/// oversized first child reverts to the first parent, an oversized second
/// child to the second. Inputs already over the ceiling pass through
/// unchanged when their output is oversized too.
#[derive(Clone, Copy, Debug)]
pub struct HeightLimit<Op> {
    inner: Op,
    max_height: usize,
}

impl<Op> HeightLimit<Op> {
    /// Wrap an operator with a height ceiling
    pub fn new(inner: Op, max_height: usize) -> Self {
        Self { inner, max_height }
    }

    /// The enforced ceiling
    pub fn max_height(&self) -> usize {
        self.max_height
    }

    fn admit(&self, output: PrimitiveTree, input: &PrimitiveTree) -> PrimitiveTree {
        if output.height() > self.max_height {
            input.clone()
        } else {
            output
        }
    }
}

/// Wrap an operator with the default ceiling of [`DEFAULT_MAX_HEIGHT`]
pub fn limit_height<Op>(inner: Op) -> HeightLimit<Op> {
    HeightLimit::new(inner, DEFAULT_MAX_HEIGHT)
}

impl<Op: CrossoverOperator> CrossoverOperator for HeightLimit<Op> {
    fn crossover<R: Rng>(
        &self,
        first: &PrimitiveTree,
        second: &PrimitiveTree,
        rng: &mut R,
    ) -> (PrimitiveTree, PrimitiveTree) {
        let (child_a, child_b) = self.inner.crossover(first, second, rng);
        (self.admit(child_a, first), self.admit(child_b, second))
    }
}

impl<Op: MutationOperator> MutationOperator for HeightLimit<Op> {
    fn mutate<R: Rng>(
        &self,
        tree: &PrimitiveTree,
        pset: &PrimitiveSet,
        rng: &mut R,
    ) -> Result<PrimitiveTree, GenerateError> {
        let mutant = self.inner.mutate(tree, pset, rng)?;
        Ok(self.admit(mutant, tree))
    }
}
