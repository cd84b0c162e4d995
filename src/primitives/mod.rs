//! Primitive registry
//!
//! This module provides the vocabulary of functions and terminals that
//! expression trees are built from.

pub mod builtins;
pub mod set;

/// Prelude module for convenient imports
pub mod prelude {
    pub use super::builtins;
    pub use super::set::{EphemeralGenerator, FunctionImpl, Primitive, PrimitiveKind, PrimitiveSet};
}
