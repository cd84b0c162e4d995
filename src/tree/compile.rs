//! Tree compilation and evaluation
//!
//! Compiling a tree resolves and checks every node against the registry up
//! front; calling the compiled program is then a single pass over the
//! prefix sequence with an explicit value stack (no recursion).

use crate::error::TreeError;
use crate::primitives::set::{FunctionImpl, PrimitiveKind, PrimitiveSet};
use crate::tree::prefix::{Node, PrimitiveTree};

/// A tree compiled into a callable numeric program
///
/// Holds the resolved function table, so evaluation never touches the
/// registry by name.
pub struct CompiledExpr<'a> {
    nodes: &'a [Node],
    table: Vec<FunctionImpl>,
    argument_count: usize,
}

impl std::fmt::Debug for CompiledExpr<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledExpr")
            .field("nodes", &self.nodes)
            .field("argument_count", &self.argument_count)
            .finish_non_exhaustive()
    }
}

/// Compile a tree against a registry
///
/// Validates every node: function symbols must exist with matching arity,
/// argument indices must be within the registry's bound arguments. Numeric
/// behavior is untouched; protected semantics live inside the primitives.
pub fn compile<'a>(
    tree: &'a PrimitiveTree,
    pset: &PrimitiveSet,
) -> Result<CompiledExpr<'a>, TreeError> {
    for node in tree.nodes() {
        match *node {
            Node::Function { symbol, arity } => {
                let primitive = pset
                    .function(symbol)
                    .ok_or(TreeError::UnknownSymbol(symbol))?;
                if primitive.arity() != arity {
                    return Err(TreeError::ArityMismatch {
                        name: primitive.name().to_string(),
                        node: arity,
                        registry: primitive.arity(),
                    });
                }
            }
            Node::Argument(index) => {
                if index >= pset.argument_count() {
                    return Err(TreeError::ArgumentOutOfRange {
                        index,
                        count: pset.argument_count(),
                    });
                }
            }
            Node::Constant(_) => {}
        }
    }

    let table = pset
        .functions()
        .iter()
        .map(|p| match p.kind() {
            PrimitiveKind::Function(f) => f.clone(),
            _ => unreachable!("function table holds only function primitives"),
        })
        .collect();

    Ok(CompiledExpr {
        nodes: tree.nodes(),
        table,
        argument_count: pset.argument_count(),
    })
}

impl CompiledExpr<'_> {
    /// Number of input arguments the program expects
    pub fn argument_count(&self) -> usize {
        self.argument_count
    }

    /// Evaluate the program over the given argument values
    ///
    /// Walks the prefix sequence in reverse with a value stack: terminals
    /// push, function nodes pop their `arity` operands and push the
    /// primitive's result. Missing arguments read as 0.
    pub fn call(&self, args: &[f64]) -> f64 {
        let mut stack: Vec<f64> = Vec::with_capacity(self.nodes.len());
        for node in self.nodes.iter().rev() {
            match *node {
                Node::Constant(v) => stack.push(v),
                Node::Argument(i) => stack.push(args.get(i).copied().unwrap_or(0.0)),
                Node::Function { symbol, arity } => {
                    // Well-formedness guarantees the operands are on the stack.
                    let at = stack.len() - arity;
                    let value = (self.table[symbol])(&stack[at..]);
                    stack.truncate(at);
                    stack.push(value);
                }
            }
        }
        stack.pop().unwrap_or(f64::NAN)
    }
}
