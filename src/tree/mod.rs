//! Expression trees
//!
//! This module provides the flat, prefix-encoded expression-tree genotype,
//! random generation strategies, and compilation into callable programs.

pub mod compile;
pub mod generate;
pub mod prefix;

/// Prelude module for convenient imports
pub mod prelude {
    pub use super::compile::{compile, CompiledExpr};
    pub use super::generate::{generate, Strategy};
    pub use super::prefix::{Node, PrimitiveTree};
}
