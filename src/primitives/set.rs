//! Primitive set type
//!
//! A `PrimitiveSet` is the registry every tree is built against: it owns the
//! function primitives, the terminal primitives, and the names of the input
//! arguments. Trees reference function primitives by index, so the registry
//! is resolved at construction time rather than at evaluation time.

use std::fmt;
use std::sync::Arc;

use rand::RngCore;

use crate::error::RegistryError;

/// Shared implementation of a function primitive
pub type FunctionImpl = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// Shared generator for ephemeral constants
///
/// Invoked once per instantiation site; the drawn value is frozen into the
/// tree node and the registry never stores it.
pub type EphemeralGenerator = Arc<dyn Fn(&mut dyn RngCore) -> f64 + Send + Sync>;

/// The kind of a primitive: function, fixed constant, or ephemeral constant
#[derive(Clone)]
pub enum PrimitiveKind {
    /// Function over numeric arguments (arity >= 1)
    Function(FunctionImpl),
    /// Terminal with a fixed value
    Constant(f64),
    /// Terminal whose value is drawn from a generator at instantiation time
    Ephemeral(EphemeralGenerator),
}

impl fmt::Debug for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(_) => f.write_str("Function(..)"),
            Self::Constant(v) => write!(f, "Constant({v})"),
            Self::Ephemeral(_) => f.write_str("Ephemeral(..)"),
        }
    }
}

/// A named operation with a fixed arity
///
/// Immutable once registered. Arity 0 primitives are terminals; everything
/// else is a function primitive.
#[derive(Clone, Debug)]
pub struct Primitive {
    name: String,
    arity: usize,
    kind: PrimitiveKind,
}

impl Primitive {
    /// Create a function primitive with the given arity
    ///
    /// Numeric faults are the primitive's own contract: a protected
    /// implementation returns a sentinel instead of a fault, and the
    /// evaluator never intercepts what the implementation produces.
    pub fn function<F>(name: impl Into<String>, arity: usize, f: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        assert!(arity >= 1, "function primitives must have arity >= 1");
        Self {
            name: name.into(),
            arity,
            kind: PrimitiveKind::Function(Arc::new(f)),
        }
    }

    /// Create a terminal primitive with a fixed value
    pub fn constant(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            arity: 0,
            kind: PrimitiveKind::Constant(value),
        }
    }

    /// Create an ephemeral-constant terminal
    ///
    /// The generator runs once per tree node that instantiates this
    /// primitive; each node freezes its own drawn value.
    pub fn ephemeral<G>(name: impl Into<String>, generator: G) -> Self
    where
        G: Fn(&mut dyn RngCore) -> f64 + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity: 0,
            kind: PrimitiveKind::Ephemeral(Arc::new(generator)),
        }
    }

    /// Get the primitive's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the primitive's arity (0 for terminals)
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Get the primitive's kind
    pub fn kind(&self) -> &PrimitiveKind {
        &self.kind
    }

    /// Check if this primitive is a terminal
    pub fn is_terminal(&self) -> bool {
        self.arity == 0
    }
}

/// Registry of primitives and input arguments
///
/// Function primitives are indexed by registration order; `Node::Function`
/// symbols are indices into that table. Argument names are bound
/// positionally and must be unique.
#[derive(Clone, Debug, Default)]
pub struct PrimitiveSet {
    arguments: Vec<String>,
    functions: Vec<Primitive>,
    terminals: Vec<Primitive>,
}

impl PrimitiveSet {
    /// Create an empty primitive set with no arguments
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a primitive set with the given argument names
    pub fn with_arguments<I, N>(names: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let mut set = Self::new();
        for name in names {
            set.add_argument(name)?;
        }
        Ok(set)
    }

    /// Bind a new input argument, returning its positional index
    pub fn add_argument(&mut self, name: impl Into<String>) -> Result<usize, RegistryError> {
        let name = name.into();
        if self.arguments.iter().any(|a| *a == name) {
            return Err(RegistryError::DuplicateArgument(name));
        }
        self.arguments.push(name);
        Ok(self.arguments.len() - 1)
    }

    /// Register a primitive
    ///
    /// Fails with `ArityConflict` when a primitive of the same name exists
    /// under a different arity. Re-registering the same name and arity
    /// replaces the implementation.
    pub fn register(&mut self, primitive: Primitive) -> Result<(), RegistryError> {
        if let Some(existing) = self
            .functions
            .iter()
            .chain(self.terminals.iter())
            .find(|p| p.name == primitive.name)
        {
            if existing.arity != primitive.arity {
                return Err(RegistryError::ArityConflict {
                    name: primitive.name,
                    existing: existing.arity,
                    requested: primitive.arity,
                });
            }
        }
        let table = if primitive.is_terminal() {
            &mut self.terminals
        } else {
            &mut self.functions
        };
        match table.iter_mut().find(|p| p.name == primitive.name) {
            Some(slot) => *slot = primitive,
            None => table.push(primitive),
        }
        Ok(())
    }

    /// Look up a primitive by name and arity
    pub fn lookup(&self, name: &str, arity: usize) -> Result<&Primitive, RegistryError> {
        self.functions
            .iter()
            .chain(self.terminals.iter())
            .find(|p| p.name == name && p.arity == arity)
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_string(),
                arity,
            })
    }

    /// Get the function primitive table (symbol indices point here)
    pub fn functions(&self) -> &[Primitive] {
        &self.functions
    }

    /// Get a function primitive by symbol index
    pub fn function(&self, symbol: usize) -> Option<&Primitive> {
        self.functions.get(symbol)
    }

    /// Get the non-argument terminal primitives
    pub fn terminals(&self) -> &[Primitive] {
        &self.terminals
    }

    /// Get the bound argument names
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Number of bound input arguments
    pub fn argument_count(&self) -> usize {
        self.arguments.len()
    }

    /// Total number of terminal choices (arguments plus terminal primitives)
    pub fn terminal_count(&self) -> usize {
        self.arguments.len() + self.terminals.len()
    }

    /// Fraction of the vocabulary that is terminal
    ///
    /// Used by the Grow strategy to weight the terminal-versus-function
    /// decision the way the vocabulary is balanced.
    pub fn terminal_ratio(&self) -> f64 {
        let terminals = self.terminal_count();
        let total = terminals + self.functions.len();
        if total == 0 {
            0.0
        } else {
            terminals as f64 / total as f64
        }
    }
}
