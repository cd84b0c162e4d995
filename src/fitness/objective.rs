//! Objective functions
//!
//! An objective scores a compiled program into raw fitness components. It
//! never sees trees or the registry, only the callable program.

use crate::tree::compile::CompiledExpr;

/// Problem-specific scoring of a compiled program
///
/// Returns raw component values; directions are attached when the values
/// become a [`Fitness`](crate::fitness::Fitness). `Send + Sync` so
/// evaluation can fan out across threads.
pub trait Objective: Send + Sync {
    /// Score a compiled program, returning one value per fitness component
    fn evaluate(&self, program: &CompiledExpr<'_>) -> Vec<f64>;
}

/// Objective backed by a plain closure
pub struct FnObjective<F>
where
    F: Fn(&CompiledExpr<'_>) -> Vec<f64> + Send + Sync,
{
    function: F,
}

impl<F> FnObjective<F>
where
    F: Fn(&CompiledExpr<'_>) -> Vec<f64> + Send + Sync,
{
    /// Wrap a closure as an objective
    pub fn new(function: F) -> Self {
        Self { function }
    }
}

impl<F> Objective for FnObjective<F>
where
    F: Fn(&CompiledExpr<'_>) -> Vec<f64> + Send + Sync,
{
    fn evaluate(&self, program: &CompiledExpr<'_>) -> Vec<f64> {
        (self.function)(program)
    }
}
