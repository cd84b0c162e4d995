//! Run diagnostics
//!
//! Per-generation summary statistics over the first fitness component, and
//! the hall of fame of best-ever individuals.

pub mod hall_of_fame;

use serde::{Deserialize, Serialize};

use crate::error::{EvoResult, EvolutionError};
use crate::population::population::Population;

/// Summary of one generation's fitness distribution
///
/// Statistics cover the raw first fitness component of every evaluated
/// individual, direction-agnostic: `min` is the numeric minimum whether
/// minimizing or maximizing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number, 0 for the initial population
    pub generation: usize,
    /// Individuals in the population
    pub population_size: usize,
    /// Objective evaluations spent reaching this generation
    pub evaluations: usize,
    /// Mean of the first fitness component
    pub avg: f64,
    /// Population standard deviation of the first fitness component
    pub std: f64,
    /// Numeric minimum of the first fitness component
    pub min: f64,
    /// Numeric maximum of the first fitness component
    pub max: f64,
}

impl GenerationStats {
    /// Summarize an evaluated population
    ///
    /// Fails with [`EvolutionError::EmptyPopulation`] when no individual
    /// carries a fitness. The standard deviation uses the population
    /// formula (divide by N).
    pub fn from_population(
        generation: usize,
        evaluations: usize,
        population: &Population,
    ) -> EvoResult<Self> {
        let values: Vec<f64> = population
            .iter()
            .filter_map(|ind| ind.fitness.as_ref())
            .map(|fitness| fitness.first())
            .collect();
        if values.is_empty() {
            return Err(EvolutionError::EmptyPopulation);
        }

        let n = values.len() as f64;
        let avg = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - avg) * (v - avg)).sum::<f64>() / n;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            generation,
            population_size: population.len(),
            evaluations,
            avg,
            std: variance.sqrt(),
            min,
            max,
        })
    }
}

/// Generation-by-generation record of a run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvolutionStats {
    generations: Vec<GenerationStats>,
}

impl EvolutionStats {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one generation's summary
    pub fn record(&mut self, stats: GenerationStats) {
        self.generations.push(stats);
    }

    /// All recorded generations, in order
    pub fn generations(&self) -> &[GenerationStats] {
        &self.generations
    }

    /// The most recent generation's summary
    pub fn latest(&self) -> Option<&GenerationStats> {
        self.generations.last()
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use super::hall_of_fame::HallOfFame;
    pub use super::{EvolutionStats, GenerationStats};
}
