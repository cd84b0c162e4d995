//! # treegp
//!
//! A Tree-Based Genetic Programming Library for Rust.
//!
//! This library evolves programs represented as typed expression trees:
//! flat prefix-encoded genotypes over a user-defined primitive vocabulary,
//! with the classic generational loop, subtree variation operators, and
//! bloat control.
//!
//! ## Core Concepts
//!
//! - **Prefix Trees**: Genotypes are contiguous node arrays in pre-order; subtrees are slices
//! - **Explicit Vocabulary**: Functions, constants, and inputs live in a [`PrimitiveSet`](primitives::set::PrimitiveSet) passed where needed
//! - **Injected Randomness**: Every stochastic step draws from one caller-supplied RNG, so a seed fixes the run
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use treegp::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(318);
//!
//! let result = EaSimple::builder()
//!     .primitives(builtins::arithmetic(["x"])?)
//!     .objective(LeastSquaresRegression::cubic())
//!     .population_size(300)
//!     .generations(40)
//!     .build()?
//!     .run(&mut rng)?;
//!
//! println!("best error: {}", result.best().unwrap().fitness.as_ref().unwrap().first());
//! ```

pub mod algorithms;
pub mod diagnostics;
pub mod error;
pub mod fitness;
pub mod operators;
pub mod population;
pub mod primitives;
pub mod tree;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::diagnostics::prelude::*;
    pub use crate::error::*;
    pub use crate::fitness::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::population::prelude::*;
    pub use crate::primitives::prelude::*;
    pub use crate::tree::prelude::*;
}
