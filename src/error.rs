//! Error types for treegp
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for primitive registry operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A primitive with this name is already registered under a different arity
    #[error("primitive `{name}` already registered with arity {existing}, requested {requested}")]
    ArityConflict {
        /// Name of the conflicting primitive
        name: String,
        /// Arity under which the name is already registered
        existing: usize,
        /// Arity requested by the new registration
        requested: usize,
    },

    /// An argument with this name is already bound
    #[error("argument `{0}` is already bound")]
    DuplicateArgument(String),

    /// No primitive with the given name and arity exists
    #[error("no primitive named `{name}` with arity {arity}")]
    NotFound {
        /// Name that was looked up
        name: String,
        /// Arity that was looked up
        arity: usize,
    },
}

/// Error type for tree generation failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The primitive set has no primitive of the required kind to place
    #[error("primitive set has no {kind} primitive to place at depth {depth}")]
    EmptyPrimitiveSet {
        /// The kind of primitive that was needed ("terminal" or "function")
        kind: &'static str,
        /// Depth at which generation got stuck
        depth: usize,
    },

    /// The requested depth range is inverted
    #[error("invalid depth range: min {min} > max {max}")]
    InvalidDepthRange {
        /// Requested minimum depth
        min: usize,
        /// Requested maximum depth
        max: usize,
    },
}

/// Error type for tree structure and compilation failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TreeError {
    /// The node sequence does not encode exactly one well-formed tree
    #[error("malformed prefix sequence: {0}")]
    Malformed(String),

    /// A function node references a symbol index outside the registry
    #[error("node references unknown function symbol {0}")]
    UnknownSymbol(usize),

    /// A function node's stored arity disagrees with the registry
    #[error("arity mismatch for `{name}`: node carries {node}, registry has {registry}")]
    ArityMismatch {
        /// Primitive name
        name: String,
        /// Arity stored in the node
        node: usize,
        /// Arity registered for the symbol
        registry: usize,
    },

    /// An argument node indexes past the registry's bound arguments
    #[error("argument index {index} out of range for {count} bound arguments")]
    ArgumentOutOfRange {
        /// Index stored in the node
        index: usize,
        /// Number of arguments bound in the registry
        count: usize,
    },
}

/// Top-level error type for evolution runs
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvolutionError {
    /// Registry error
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Generation error
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// Tree error
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// Statistics or selection requested over an empty population
    #[error("empty population")]
    EmptyPopulation,

    /// Invalid run configuration
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

/// Result type alias for evolution operations
pub type EvoResult<T> = Result<T, EvolutionError>;
