//! Tournament selection

use rand::Rng;

use crate::operators::traits::SelectionOperator;
use crate::population::individual::Individual;

/// Tournament selection with replacement
///
/// Draws `tournament_size` contestants uniformly (the same individual may
/// be drawn more than once) and keeps the best. Ties go to the earliest
/// draw, because only a strictly better challenger displaces the leader.
#[derive(Clone, Copy, Debug)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Create a tournament of the given size
    pub fn new(tournament_size: usize) -> Self {
        assert!(tournament_size >= 1, "tournament size must be at least 1");
        Self { tournament_size }
    }

    /// Number of contestants per tournament
    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self::new(3)
    }
}

impl SelectionOperator for TournamentSelection {
    fn select<R: Rng>(&self, population: &[Individual], rng: &mut R) -> usize {
        assert!(!population.is_empty(), "cannot select from an empty population");
        let mut best = rng.gen_range(0..population.len());
        for _ in 1..self.tournament_size {
            let challenger = rng.gen_range(0..population.len());
            if population[challenger].is_better_than(&population[best]) {
                best = challenger;
            }
        }
        best
    }
}
