//! Genetic operators
//!
//! Selection, crossover, and mutation, each behind a small trait so
//! algorithms stay generic over operator choice. The height-limit
//! decorator wraps the variation operators to keep bloat in check.

pub mod crossover;
pub mod limit;
pub mod mutation;
pub mod selection;
pub mod traits;

/// Prelude module for convenient imports
pub mod prelude {
    pub use super::crossover::SubtreeCrossover;
    pub use super::limit::{limit_height, HeightLimit, DEFAULT_MAX_HEIGHT};
    pub use super::mutation::UniformMutation;
    pub use super::selection::TournamentSelection;
    pub use super::traits::{CrossoverOperator, MutationOperator, SelectionOperator};
}
