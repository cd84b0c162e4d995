//! Populations of candidate programs

pub mod individual;
#[allow(clippy::module_inception)]
pub mod population;

/// Prelude module for convenient imports
pub mod prelude {
    pub use super::individual::Individual;
    pub use super::population::Population;
}
