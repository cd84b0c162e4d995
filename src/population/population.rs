//! Populations and evaluation

use std::ops::Index;

use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{EvoResult, EvolutionError, GenerateError};
use crate::fitness::objective::Objective;
use crate::fitness::{Direction, Fitness};
use crate::population::individual::Individual;
use crate::primitives::set::PrimitiveSet;
use crate::tree::compile::compile;
use crate::tree::generate::{generate, Strategy};

/// An ordered collection of individuals
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Create an empty population
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a population from existing individuals
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// Generate `size` random individuals with the given strategy
    pub fn generate<R: Rng>(
        size: usize,
        pset: &PrimitiveSet,
        strategy: Strategy,
        min_depth: usize,
        max_depth: usize,
        rng: &mut R,
    ) -> Result<Self, GenerateError> {
        let mut individuals = Vec::with_capacity(size);
        for _ in 0..size {
            let tree = generate(pset, strategy, min_depth, max_depth, rng)?;
            individuals.push(Individual::new(tree));
        }
        Ok(Self { individuals })
    }

    /// Number of individuals
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Check if the population is empty
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Iterate over individuals
    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.individuals.iter()
    }

    /// Iterate mutably over individuals
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Individual> {
        self.individuals.iter_mut()
    }

    /// Append an individual
    pub fn push(&mut self, individual: Individual) {
        self.individuals.push(individual);
    }

    /// Get an individual by index
    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    /// View the individuals as a slice
    pub fn as_slice(&self) -> &[Individual] {
        &self.individuals
    }

    /// The best evaluated individual, or `None` if none is evaluated
    pub fn best(&self) -> Option<&Individual> {
        self.individuals
            .iter()
            .filter(|ind| ind.is_evaluated())
            .reduce(|best, ind| if ind.is_better_than(best) { ind } else { best })
    }

    /// Evaluate every pending individual sequentially
    ///
    /// Already-evaluated individuals are skipped. Returns the number of
    /// objective evaluations performed.
    pub fn evaluate(
        &mut self,
        pset: &PrimitiveSet,
        objective: &dyn Objective,
        directions: &[Direction],
    ) -> EvoResult<usize> {
        let mut evaluations = 0;
        for individual in &mut self.individuals {
            if individual.is_evaluated() {
                continue;
            }
            let program = compile(&individual.tree, pset)?;
            let values = objective.evaluate(&program);
            individual.fitness = Some(Fitness::new(values, directions));
            evaluations += 1;
        }
        Ok(evaluations)
    }

    /// Evaluate every pending individual across threads
    ///
    /// Same skip-and-count contract as [`Population::evaluate`]. Drawing no
    /// randomness, the result is identical to the sequential path.
    #[cfg(feature = "parallel")]
    pub fn evaluate_parallel<O: Objective>(
        &mut self,
        pset: &PrimitiveSet,
        objective: &O,
        directions: &[Direction],
    ) -> EvoResult<usize> {
        let evaluations = self
            .individuals
            .par_iter_mut()
            .filter(|ind| !ind.is_evaluated())
            .map(|individual| {
                let program = compile(&individual.tree, pset)?;
                let values = objective.evaluate(&program);
                individual.fitness = Some(Fitness::new(values, directions));
                Ok::<usize, EvolutionError>(1)
            })
            .try_reduce(|| 0, |a, b| Ok(a + b))?;
        Ok(evaluations)
    }

    /// Sequential fallback when the `parallel` feature is disabled
    #[cfg(not(feature = "parallel"))]
    pub fn evaluate_parallel<O: Objective>(
        &mut self,
        pset: &PrimitiveSet,
        objective: &O,
        directions: &[Direction],
    ) -> EvoResult<usize> {
        self.evaluate(pset, objective, directions)
    }
}

impl Index<usize> for Population {
    type Output = Individual;

    fn index(&self, index: usize) -> &Individual {
        &self.individuals[index]
    }
}

impl IntoIterator for Population {
    type Item = Individual;
    type IntoIter = std::vec::IntoIter<Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.into_iter()
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Individual;
    type IntoIter = std::slice::Iter<'a, Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::regression::LeastSquaresRegression;
    use crate::primitives::builtins;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const MINIMIZE: [Direction; 1] = [Direction::Minimize];

    fn setup() -> (PrimitiveSet, LeastSquaresRegression) {
        (
            builtins::arithmetic(["x"]).unwrap(),
            LeastSquaresRegression::cubic(),
        )
    }

    #[test]
    fn test_generate_population() {
        let (pset, _) = setup();
        let mut rng = StdRng::seed_from_u64(51);

        let population =
            Population::generate(30, &pset, Strategy::Full, 1, 2, &mut rng).unwrap();
        assert_eq!(population.len(), 30);
        assert!(population.iter().all(|ind| !ind.is_evaluated()));
        assert!(population.iter().all(|ind| ind.tree.height() <= 2));
    }

    #[test]
    fn test_evaluate_scores_everyone() {
        let (pset, objective) = setup();
        let mut rng = StdRng::seed_from_u64(52);
        let mut population =
            Population::generate(20, &pset, Strategy::Full, 1, 2, &mut rng).unwrap();

        let evaluations = population.evaluate(&pset, &objective, &MINIMIZE).unwrap();
        assert_eq!(evaluations, 20);
        assert!(population.iter().all(|ind| ind.is_evaluated()));
    }

    #[test]
    fn test_evaluate_skips_already_scored() {
        let (pset, objective) = setup();
        let mut rng = StdRng::seed_from_u64(53);
        let mut population =
            Population::generate(10, &pset, Strategy::Full, 1, 2, &mut rng).unwrap();

        population.evaluate(&pset, &objective, &MINIMIZE).unwrap();
        let again = population.evaluate(&pset, &objective, &MINIMIZE).unwrap();
        assert_eq!(again, 0);
    }

    #[test]
    fn test_evaluate_after_invalidation() {
        let (pset, objective) = setup();
        let mut rng = StdRng::seed_from_u64(54);
        let mut population =
            Population::generate(10, &pset, Strategy::Full, 1, 2, &mut rng).unwrap();

        population.evaluate(&pset, &objective, &MINIMIZE).unwrap();
        population.iter_mut().take(3).for_each(Individual::invalidate);
        let evaluations = population.evaluate(&pset, &objective, &MINIMIZE).unwrap();
        assert_eq!(evaluations, 3);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (pset, objective) = setup();
        let mut rng = StdRng::seed_from_u64(55);
        let base = Population::generate(25, &pset, Strategy::HalfAndHalf, 1, 3, &mut rng).unwrap();

        let mut sequential = base.clone();
        let mut parallel = base;
        sequential.evaluate(&pset, &objective, &MINIMIZE).unwrap();
        parallel
            .evaluate_parallel(&pset, &objective, &MINIMIZE)
            .unwrap();

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_best() {
        let (pset, objective) = setup();
        let mut rng = StdRng::seed_from_u64(56);
        let mut population =
            Population::generate(15, &pset, Strategy::HalfAndHalf, 1, 3, &mut rng).unwrap();

        assert!(population.best().is_none());
        population.evaluate(&pset, &objective, &MINIMIZE).unwrap();

        let best = population.best().unwrap();
        let best_error = best.fitness.as_ref().unwrap().first();
        assert!(population
            .iter()
            .all(|ind| ind.fitness.as_ref().unwrap().first() >= best_error));
    }
}
