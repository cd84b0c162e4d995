//! Evolutionary algorithms

pub mod ea_simple;

/// Prelude module for convenient imports
pub mod prelude {
    pub use super::ea_simple::{EaSimple, EaSimpleBuilder, EvolutionConfig, EvolutionResult};
}
