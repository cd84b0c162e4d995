//! Prefix-encoded expression trees
//!
//! A tree is a non-empty sequence of nodes in depth-first pre-order. No
//! child pointers are stored: a node's subtree is the contiguous slice
//! found by walking arities, which makes subtree crossover and mutation
//! cheap slice splices.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::TreeError;
use crate::primitives::set::PrimitiveSet;

/// A single node of a prefix-encoded tree
///
/// Function nodes carry their registry symbol and arity; terminal nodes
/// carry either an argument index or a frozen constant value (fixed
/// terminals and instantiated ephemeral constants look the same here).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Function primitive, referenced by index into the registry's table
    Function {
        /// Index into [`PrimitiveSet::functions`]
        symbol: usize,
        /// Number of children, mirrored from the registry for O(1) walks
        arity: usize,
    },
    /// Input variable, referenced by positional argument index
    Argument(usize),
    /// Frozen constant value
    Constant(f64),
}

impl Node {
    /// Number of children this node consumes
    pub fn arity(&self) -> usize {
        match self {
            Self::Function { arity, .. } => *arity,
            Self::Argument(_) | Self::Constant(_) => 0,
        }
    }

    /// Check if this node is a terminal
    pub fn is_terminal(&self) -> bool {
        self.arity() == 0
    }
}

/// An expression tree stored as a prefix node sequence
///
/// Invariants: the sequence is non-empty, and consuming exactly `arity`
/// children per node from the root uses up the whole sequence. Height and
/// size are derived, never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveTree {
    nodes: Vec<Node>,
}

impl PrimitiveTree {
    /// Create a tree from a prefix node sequence, validating well-formedness
    pub fn from_nodes(nodes: Vec<Node>) -> Result<Self, TreeError> {
        if nodes.is_empty() {
            return Err(TreeError::Malformed("empty node sequence".to_string()));
        }
        let mut pending = 1usize;
        for (i, node) in nodes.iter().enumerate() {
            if pending == 0 {
                return Err(TreeError::Malformed(format!(
                    "{} leftover node(s) after position {i}",
                    nodes.len() - i
                )));
            }
            pending = pending - 1 + node.arity();
        }
        if pending != 0 {
            return Err(TreeError::Malformed(format!(
                "sequence ends with {pending} child slot(s) unfilled"
            )));
        }
        Ok(Self { nodes })
    }

    /// Create a tree from a sequence known to be well-formed
    ///
    /// Used by generation and the genetic operators, which only ever splice
    /// whole subtrees and therefore preserve the invariant.
    pub(crate) fn from_nodes_unchecked(nodes: Vec<Node>) -> Self {
        debug_assert!(Self::from_nodes(nodes.clone()).is_ok());
        Self { nodes }
    }

    /// Create a single-node tree
    pub fn leaf(node: Node) -> Result<Self, TreeError> {
        Self::from_nodes(vec![node])
    }

    /// Get the prefix node sequence
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Get the root node
    pub fn root(&self) -> Node {
        self.nodes[0]
    }

    /// Number of nodes in the tree
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Tree height as the longest root-to-leaf edge count
    ///
    /// A single terminal has height 0.
    pub fn height(&self) -> usize {
        let mut depths = vec![0usize];
        let mut max = 0;
        for node in &self.nodes {
            let Some(depth) = depths.pop() else { break };
            max = max.max(depth);
            for _ in 0..node.arity() {
                depths.push(depth + 1);
            }
        }
        max
    }

    /// Identify the slice spanned by the subtree rooted at `index`
    ///
    /// Walks arities from `index`: the span ends once every opened child
    /// slot has been filled. O(subtree size).
    pub fn subtree(&self, index: usize) -> Range<usize> {
        assert!(index < self.nodes.len(), "subtree index out of bounds");
        let mut end = index + 1;
        let mut pending = self.nodes[index].arity();
        while pending > 0 {
            pending = pending - 1 + self.nodes[end].arity();
            end += 1;
        }
        index..end
    }

    /// Replace the subtree spanning `range` with another prefix sequence
    ///
    /// `range` must come from [`PrimitiveTree::subtree`] and `replacement`
    /// must itself be a well-formed prefix sequence, so the result stays a
    /// single well-formed tree.
    pub(crate) fn splice(&mut self, range: Range<usize>, replacement: &[Node]) {
        self.nodes.splice(range, replacement.iter().copied());
    }

    /// Render the tree as an s-expression against a registry
    pub fn display<'a>(&'a self, pset: &'a PrimitiveSet) -> Sexpr<'a> {
        Sexpr { tree: self, pset }
    }
}

/// S-expression rendering of a tree, with names resolved via a registry
#[derive(Clone, Copy)]
pub struct Sexpr<'a> {
    tree: &'a PrimitiveTree,
    pset: &'a PrimitiveSet,
}

impl Sexpr<'_> {
    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, index: usize) -> Result<usize, fmt::Error> {
        match self.tree.nodes()[index] {
            Node::Constant(v) => {
                write!(f, "{v}")?;
                Ok(index + 1)
            }
            Node::Argument(i) => {
                match self.pset.arguments().get(i) {
                    Some(name) => write!(f, "{name}")?,
                    None => write!(f, "arg{i}")?,
                }
                Ok(index + 1)
            }
            Node::Function { symbol, arity } => {
                match self.pset.function(symbol) {
                    Some(p) => write!(f, "({}", p.name())?,
                    None => write!(f, "(fn{symbol}")?,
                }
                let mut next = index + 1;
                for _ in 0..arity {
                    f.write_str(" ")?;
                    next = self.fmt_node(f, next)?;
                }
                f.write_str(")")?;
                Ok(next)
            }
        }
    }
}

impl fmt::Display for Sexpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, 0).map(|_| ())
    }
}
