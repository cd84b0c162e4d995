//! The simple generational algorithm
//!
//! The classic loop: select a full offspring pool from the current
//! generation, apply crossover to adjacent pairs and mutation to single
//! individuals under independent probabilities, evaluate what changed, and
//! replace the whole generation. One injected RNG drives every stochastic
//! decision, so a seed fixes the run.

use rand::Rng;

use crate::diagnostics::hall_of_fame::HallOfFame;
use crate::diagnostics::{EvolutionStats, GenerationStats};
use crate::error::{EvoResult, EvolutionError};
use crate::fitness::objective::Objective;
use crate::fitness::regression::LeastSquaresRegression;
use crate::fitness::Direction;
use crate::operators::crossover::SubtreeCrossover;
use crate::operators::limit::{limit_height, HeightLimit};
use crate::operators::mutation::UniformMutation;
use crate::operators::selection::TournamentSelection;
use crate::operators::traits::{CrossoverOperator, MutationOperator, SelectionOperator};
use crate::population::individual::Individual;
use crate::population::population::Population;
use crate::primitives::set::PrimitiveSet;
use crate::tree::generate::Strategy;

/// Run parameters of the simple generational algorithm
#[derive(Clone, Debug)]
pub struct EvolutionConfig {
    /// Individuals per generation
    pub population_size: usize,
    /// Per-pair probability of crossover
    pub crossover_probability: f64,
    /// Per-individual probability of mutation
    pub mutation_probability: f64,
    /// Generations to run after the initial one
    pub generations: usize,
    /// Fitness component directions
    pub directions: Vec<Direction>,
    /// Initialization strategy
    pub init_strategy: Strategy,
    /// Minimum initial tree depth
    pub init_min_depth: usize,
    /// Maximum initial tree depth
    pub init_max_depth: usize,
    /// Hall of fame capacity
    pub hall_of_fame_size: usize,
    /// Evaluate across threads when available
    pub parallel_evaluation: bool,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 300,
            crossover_probability: 0.5,
            mutation_probability: 0.2,
            generations: 40,
            directions: vec![Direction::Minimize],
            init_strategy: Strategy::Full,
            init_min_depth: 1,
            init_max_depth: 2,
            hall_of_fame_size: 1,
            parallel_evaluation: cfg!(feature = "parallel"),
        }
    }
}

impl EvolutionConfig {
    /// Check the parameters for consistency
    pub fn validate(&self) -> EvoResult<()> {
        if self.population_size == 0 {
            return Err(EvolutionError::Configuration(
                "population_size must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_probability) {
            return Err(EvolutionError::Configuration(format!(
                "crossover_probability {} outside [0, 1]",
                self.crossover_probability
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(EvolutionError::Configuration(format!(
                "mutation_probability {} outside [0, 1]",
                self.mutation_probability
            )));
        }
        if self.directions.is_empty() {
            return Err(EvolutionError::Configuration(
                "at least one fitness direction is required".to_string(),
            ));
        }
        if self.init_min_depth > self.init_max_depth {
            return Err(EvolutionError::Configuration(format!(
                "init depth range {}..={} is inverted",
                self.init_min_depth, self.init_max_depth
            )));
        }
        if self.hall_of_fame_size == 0 {
            return Err(EvolutionError::Configuration(
                "hall_of_fame_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of a finished run
#[derive(Clone, Debug)]
pub struct EvolutionResult {
    /// The final generation
    pub population: Population,
    /// Per-generation statistics, including generation 0
    pub stats: EvolutionStats,
    /// Best individuals ever seen
    pub hall_of_fame: HallOfFame,
}

impl EvolutionResult {
    /// The best individual ever seen across the run
    pub fn best(&self) -> Option<&Individual> {
        self.hall_of_fame.best()
    }
}

/// The simple generational algorithm over configurable operators
pub struct EaSimple<S, C, M, O>
where
    S: SelectionOperator,
    C: CrossoverOperator,
    M: MutationOperator,
    O: Objective,
{
    config: EvolutionConfig,
    pset: PrimitiveSet,
    selection: S,
    crossover: C,
    mutation: M,
    objective: O,
}

impl<S, C, M, O> std::fmt::Debug for EaSimple<S, C, M, O>
where
    S: SelectionOperator,
    C: CrossoverOperator,
    M: MutationOperator,
    O: Objective,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EaSimple")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl
    EaSimple<
        TournamentSelection,
        HeightLimit<SubtreeCrossover>,
        HeightLimit<UniformMutation>,
        LeastSquaresRegression,
    >
{
    /// Start building a run with the standard operator suite
    ///
    /// Defaults: tournament of 3, height-limited subtree crossover and
    /// uniform mutation. The vocabulary and objective must still be set.
    pub fn builder() -> EaSimpleBuilder<
        TournamentSelection,
        HeightLimit<SubtreeCrossover>,
        HeightLimit<UniformMutation>,
        LeastSquaresRegression,
    > {
        EaSimpleBuilder {
            config: EvolutionConfig::default(),
            pset: None,
            selection: Some(TournamentSelection::default()),
            crossover: Some(limit_height(SubtreeCrossover::new())),
            mutation: Some(limit_height(UniformMutation::default())),
            objective: None,
        }
    }
}

impl<S, C, M, O> EaSimple<S, C, M, O>
where
    S: SelectionOperator,
    C: CrossoverOperator,
    M: MutationOperator,
    O: Objective,
{
    /// The run parameters
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Run the algorithm to completion
    ///
    /// Records statistics for the initial population as generation 0 and
    /// once per generation after, `generations + 1` entries in total.
    pub fn run<R: Rng>(&self, rng: &mut R) -> EvoResult<EvolutionResult> {
        let config = &self.config;
        let mut population = Population::generate(
            config.population_size,
            &self.pset,
            config.init_strategy,
            config.init_min_depth,
            config.init_max_depth,
            rng,
        )?;
        let mut total_evaluations = self.evaluate(&mut population)?;

        let mut hall_of_fame = HallOfFame::new(config.hall_of_fame_size);
        hall_of_fame.update(population.as_slice());

        let mut stats = EvolutionStats::new();
        stats.record(GenerationStats::from_population(
            0,
            total_evaluations,
            &population,
        )?);

        for generation in 1..=config.generations {
            let mut offspring =
                self.selection
                    .select_many(population.as_slice(), population.len(), rng);
            self.vary(&mut offspring, rng)?;

            population = Population::from_individuals(offspring);
            total_evaluations += self.evaluate(&mut population)?;

            hall_of_fame.update(population.as_slice());
            stats.record(GenerationStats::from_population(
                generation,
                total_evaluations,
                &population,
            )?);
        }

        Ok(EvolutionResult {
            population,
            stats,
            hall_of_fame,
        })
    }

    /// Crossover over adjacent pairs, then mutation over single individuals
    ///
    /// The two passes draw their probabilities independently, so one
    /// individual can be crossed and then mutated in the same generation.
    /// Every varied individual loses its fitness.
    fn vary<R: Rng>(&self, offspring: &mut [Individual], rng: &mut R) -> EvoResult<()> {
        let config = &self.config;
        for i in (1..offspring.len()).step_by(2) {
            if rng.gen::<f64>() < config.crossover_probability {
                let (child_a, child_b) =
                    self.crossover
                        .crossover(&offspring[i - 1].tree, &offspring[i].tree, rng);
                offspring[i - 1].tree = child_a;
                offspring[i - 1].invalidate();
                offspring[i].tree = child_b;
                offspring[i].invalidate();
            }
        }
        for individual in offspring.iter_mut() {
            if rng.gen::<f64>() < config.mutation_probability {
                individual.tree = self.mutation.mutate(&individual.tree, &self.pset, rng)?;
                individual.invalidate();
            }
        }
        Ok(())
    }

    fn evaluate(&self, population: &mut Population) -> EvoResult<usize> {
        if self.config.parallel_evaluation {
            population.evaluate_parallel(&self.pset, &self.objective, &self.config.directions)
        } else {
            population.evaluate(&self.pset, &self.objective, &self.config.directions)
        }
    }
}

/// Builder for [`EaSimple`]
///
/// Operator setters swap the corresponding type parameter, so any mix of
/// operator implementations can be assembled without boxing.
pub struct EaSimpleBuilder<S, C, M, O>
where
    S: SelectionOperator,
    C: CrossoverOperator,
    M: MutationOperator,
    O: Objective,
{
    config: EvolutionConfig,
    pset: Option<PrimitiveSet>,
    selection: Option<S>,
    crossover: Option<C>,
    mutation: Option<M>,
    objective: Option<O>,
}

impl<S, C, M, O> EaSimpleBuilder<S, C, M, O>
where
    S: SelectionOperator,
    C: CrossoverOperator,
    M: MutationOperator,
    O: Objective,
{
    /// Set the full run configuration
    pub fn config(mut self, config: EvolutionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the primitive vocabulary (required)
    pub fn primitives(mut self, pset: PrimitiveSet) -> Self {
        self.pset = Some(pset);
        self
    }

    /// Set the population size
    pub fn population_size(mut self, size: usize) -> Self {
        self.config.population_size = size;
        self
    }

    /// Set the number of generations
    pub fn generations(mut self, generations: usize) -> Self {
        self.config.generations = generations;
        self
    }

    /// Set the crossover probability
    pub fn crossover_probability(mut self, probability: f64) -> Self {
        self.config.crossover_probability = probability;
        self
    }

    /// Set the mutation probability
    pub fn mutation_probability(mut self, probability: f64) -> Self {
        self.config.mutation_probability = probability;
        self
    }

    /// Set the fitness component directions
    pub fn directions(mut self, directions: Vec<Direction>) -> Self {
        self.config.directions = directions;
        self
    }

    /// Set the selection operator
    pub fn selection<S2: SelectionOperator>(self, selection: S2) -> EaSimpleBuilder<S2, C, M, O> {
        EaSimpleBuilder {
            config: self.config,
            pset: self.pset,
            selection: Some(selection),
            crossover: self.crossover,
            mutation: self.mutation,
            objective: self.objective,
        }
    }

    /// Set the crossover operator
    pub fn crossover<C2: CrossoverOperator>(self, crossover: C2) -> EaSimpleBuilder<S, C2, M, O> {
        EaSimpleBuilder {
            config: self.config,
            pset: self.pset,
            selection: self.selection,
            crossover: Some(crossover),
            mutation: self.mutation,
            objective: self.objective,
        }
    }

    /// Set the mutation operator
    pub fn mutation<M2: MutationOperator>(self, mutation: M2) -> EaSimpleBuilder<S, C, M2, O> {
        EaSimpleBuilder {
            config: self.config,
            pset: self.pset,
            selection: self.selection,
            crossover: self.crossover,
            mutation: Some(mutation),
            objective: self.objective,
        }
    }

    /// Set the objective (required)
    pub fn objective<O2: Objective>(self, objective: O2) -> EaSimpleBuilder<S, C, M, O2> {
        EaSimpleBuilder {
            config: self.config,
            pset: self.pset,
            selection: self.selection,
            crossover: self.crossover,
            mutation: self.mutation,
            objective: Some(objective),
        }
    }

    /// Validate and assemble the algorithm
    pub fn build(self) -> EvoResult<EaSimple<S, C, M, O>> {
        self.config.validate()?;
        let pset = self.pset.ok_or_else(|| {
            EvolutionError::Configuration("primitive vocabulary is required".to_string())
        })?;
        let selection = self.selection.ok_or_else(|| {
            EvolutionError::Configuration("selection operator is required".to_string())
        })?;
        let crossover = self.crossover.ok_or_else(|| {
            EvolutionError::Configuration("crossover operator is required".to_string())
        })?;
        let mutation = self.mutation.ok_or_else(|| {
            EvolutionError::Configuration("mutation operator is required".to_string())
        })?;
        let objective = self
            .objective
            .ok_or_else(|| EvolutionError::Configuration("objective is required".to_string()))?;

        Ok(EaSimple {
            config: self.config,
            pset,
            selection,
            crossover,
            mutation,
            objective,
        })
    }
}
