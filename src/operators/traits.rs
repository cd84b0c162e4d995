//! Operator traits

use rand::Rng;

use crate::error::GenerateError;
use crate::population::individual::Individual;
use crate::primitives::set::PrimitiveSet;
use crate::tree::prefix::PrimitiveTree;

/// Selection of parents from an evaluated population
pub trait SelectionOperator {
    /// Select the index of one individual from the population
    fn select<R: Rng>(&self, population: &[Individual], rng: &mut R) -> usize;

    /// Select `count` individuals, cloning each pick
    ///
    /// Clones so the returned offspring pool shares no state with the
    /// source population, even when one individual is picked repeatedly.
    fn select_many<R: Rng>(
        &self,
        population: &[Individual],
        count: usize,
        rng: &mut R,
    ) -> Vec<Individual> {
        (0..count)
            .map(|_| population[self.select(population, rng)].clone())
            .collect()
    }
}

/// Recombination of two parent trees into two children
pub trait CrossoverOperator {
    /// Cross two parents, returning two children
    ///
    /// Parents are untouched; children are fresh trees.
    fn crossover<R: Rng>(
        &self,
        first: &PrimitiveTree,
        second: &PrimitiveTree,
        rng: &mut R,
    ) -> (PrimitiveTree, PrimitiveTree);
}

/// Random variation of a single tree
pub trait MutationOperator {
    /// Mutate a tree, returning a fresh mutant
    fn mutate<R: Rng>(
        &self,
        tree: &PrimitiveTree,
        pset: &PrimitiveSet,
        rng: &mut R,
    ) -> Result<PrimitiveTree, GenerateError>;
}
